pub mod credentials;
pub mod net;

// Re-exports for convenience
pub use credentials::{CredentialError, CredentialStore};
pub use net::{default_http_client, HttpRepoApi};
