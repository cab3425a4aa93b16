use async_trait::async_trait;
use propelhub_core::{ApiError, Payload};

/// Remote operations the effect handlers call into.
///
/// Each call receives the payload of the triggering action unchanged.
#[async_trait]
pub trait RepoApi: Send + Sync + 'static {
    async fn fetch_repos(&self, payload: Option<Payload>) -> Result<Payload, ApiError>;
    async fn git_commit(&self, payload: Option<Payload>) -> Result<Payload, ApiError>;
    async fn get_builds(&self, payload: Option<Payload>) -> Result<Payload, ApiError>;
}

/// Where the shell reads the stored credential from at startup.
pub trait TokenSource: Send + Sync + 'static {
    fn load(&self) -> anyhow::Result<String>;
}

/// Fixed credential, e.g. one passed on the command line.
impl TokenSource for String {
    fn load(&self) -> anyhow::Result<String> {
        Ok(self.clone())
    }
}
