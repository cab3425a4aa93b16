use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use propelhub_app_core::TokenSource;
use propelhub_config::CREDENTIALS_FILE;
use serde::{Deserialize, Serialize};
use tracing::debug;

const QUALIFIER: &str = "com";
const ORG: &str = "propelhub";
const APP: &str = "propelhub";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("credentials file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Credentials {
    authorization: String,
}

/// Stored API credential, kept as JSON in the user's config directory.
///
/// A missing file reads as the empty token.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at the platform config location.
    pub fn new() -> Result<Self, CredentialError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORG, APP).ok_or(CredentialError::NoConfigDir)?;
        Ok(Self::at(dirs.config_dir().join(CREDENTIALS_FILE)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_token(&self) -> Result<String, CredentialError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no stored credential");
            return Ok(String::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let creds: Credentials = serde_json::from_str(&content)?;
        Ok(creds.authorization)
    }

    pub fn save_token(&self, token: &str) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Credentials {
            authorization: token.to_string(),
        })?;
        atomic_write(&self.path, json.as_bytes())?;
        Ok(())
    }

    /// Remove the stored credential. Clearing an absent one is not an error.
    pub fn clear(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl TokenSource for CredentialStore {
    fn load(&self) -> anyhow::Result<String> {
        Ok(self.read_token()?)
    }
}

fn atomic_write(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp_path = {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    };

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path).ok();
            fs::rename(&tmp_path, path)
        }
        Err(e) => {
            fs::remove_file(&tmp_path).ok();
            Err(e)
        }
    }
}
