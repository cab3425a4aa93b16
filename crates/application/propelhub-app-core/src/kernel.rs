use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::FutureExt;
use futures::stream::{FuturesUnordered, StreamExt};
use propelhub_config::{ACTION_CHANNEL_CAPACITY, ACTION_STREAM_CAPACITY};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::app_core::{Action, AppStore};
use crate::epics::{combine_epics, Effect, RootEpic};
use crate::ports::RepoApi;

/// Follow-up of one request, `None` when its effect panicked.
type Settled = Option<Action>;

/// Dispatch path of the slice.
///
/// Every action, whether dispatched by the shell or produced by an effect,
/// goes through [`Kernel::dispatch`]: the reducer runs first, then the action
/// is published to subscribers and offered to the epics. Effects are handed
/// to a single issuer task in dispatch order, so requests go out in the order
/// their triggers were dispatched. Completions come back in whatever order
/// they finish; overlapping triggers are never cancelled or serialized.
///
/// The issuer task is spawned on construction, so a kernel must be created
/// from within a tokio runtime.
pub struct Kernel<A> {
    pub store: AppStore,
    epics: RootEpic<A>,

    tx: mpsc::Sender<Action>,
    rx: mpsc::Receiver<Action>,
    stream: broadcast::Sender<Action>,

    effects: mpsc::UnboundedSender<Effect>,
    settled: mpsc::UnboundedReceiver<Settled>,
    in_flight: usize,
}

impl<A: RepoApi> Kernel<A> {
    pub fn new(store: AppStore, api: A) -> Self {
        Self::with_shared_api(store, Arc::new(api))
    }

    pub fn with_shared_api(store: AppStore, api: Arc<A>) -> Self {
        let (tx, rx) = mpsc::channel(ACTION_CHANNEL_CAPACITY);
        let (stream, _) = broadcast::channel(ACTION_STREAM_CAPACITY);
        let (effects, effects_rx) = mpsc::unbounded_channel();
        let (settled_tx, settled) = mpsc::unbounded_channel();
        tokio::spawn(issue(effects_rx, settled_tx));

        Self {
            store,
            epics: combine_epics(api),
            tx,
            rx,
            stream,
            effects,
            settled,
            in_flight: 0,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.kind.name(), "dispatch");
        self.store.apply(&action);

        let effects = self.epics.on(&action);
        // No subscribers is fine.
        let _ = self.stream.send(action.clone());

        for effect in effects {
            let request_id = Uuid::new_v4();
            let span = info_span!("request", %request_id, trigger = action.kind.name());
            info!(parent: &span, "request issued");

            if self.effects.send(effect.instrument(span).boxed()).is_ok() {
                self.in_flight += 1;
            } else {
                warn!(trigger = action.kind.name(), "issuer stopped, request dropped");
            }
        }
    }

    /// Apply follow-up actions that have already arrived, without waiting.
    pub fn tick(&mut self) {
        while let Ok(settled) = self.settled.try_recv() {
            self.complete(settled);
        }
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
        }
    }

    /// Drive the dispatch path until no request is in flight and every
    /// follow-up has been applied.
    pub async fn settle(&mut self) {
        loop {
            self.tick();
            if self.in_flight == 0 {
                break;
            }
            tokio::select! {
                Some(action) = self.rx.recv() => self.dispatch(action),
                settled = self.settled.recv() => match settled {
                    Some(settled) => self.complete(settled),
                    None => {
                        warn!(lost = self.in_flight, "issuer stopped with requests in flight");
                        self.in_flight = 0;
                    }
                },
            }
        }
    }

    /// Number of requests whose follow-up has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Observe every dispatched action, including effect follow-ups.
    pub fn subscribe(&self) -> broadcast::Receiver<Action> {
        self.stream.subscribe()
    }

    /// Feed actions in from outside the kernel, e.g. from another task.
    pub fn sender(&self) -> mpsc::Sender<Action> {
        self.tx.clone()
    }

    fn complete(&mut self, settled: Settled) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match settled {
            Some(follow_up) => {
                debug!(action = follow_up.kind.name(), "request settled");
                self.dispatch(follow_up);
            }
            None => warn!("request ended abnormally"),
        }
    }
}

/// Owns every running effect. `FuturesUnordered` polls newly pushed futures
/// in push order, and effects are pushed in the order they were received, so
/// each API call starts in dispatch order.
async fn issue(
    mut effects: mpsc::UnboundedReceiver<Effect>,
    settled: mpsc::UnboundedSender<Settled>,
) {
    let mut running = FuturesUnordered::new();
    loop {
        tokio::select! {
            next = effects.recv() => match next {
                Some(effect) => running.push(AssertUnwindSafe(effect).catch_unwind()),
                None => break,
            },
            Some(outcome) = running.next(), if !running.is_empty() => {
                if settled.send(outcome.ok()).is_err() {
                    break;
                }
            }
        }
    }
    debug!(dropped = running.len(), "issuer stopped");
}
