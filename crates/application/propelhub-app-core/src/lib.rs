pub mod app_core;
pub mod domain;
pub mod epics;
pub mod kernel;
pub mod ports;

pub use app_core::*;
pub use domain::RepoState;
pub use epics::{combine_epics, Effect, Epic, RootEpic};
pub use kernel::Kernel;
pub use ports::*;
pub use propelhub_core::{ApiError, Payload, Phase, WorkflowState};
