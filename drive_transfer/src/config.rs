//! Locations of the credential files and the Drive API endpoint.

use std::path::{Path, PathBuf};

use crate::error::{DriveError, Result};

/// Base URL for Google Drive API v3.
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// File name of the OAuth2 client secrets.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// File name of the cached token.
pub const TOKEN_FILE: &str = "token.json";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials_path: PathBuf,
    pub token_path: PathBuf,
    pub api_base: String,
}

impl Config {
    /// Configuration with both files inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            credentials_path: dir.join(CREDENTIALS_FILE),
            token_path: dir.join(TOKEN_FILE),
            api_base: DRIVE_API_BASE.to_string(),
        }
    }

    /// Configuration with both files next to the running executable.
    pub fn beside_executable() -> Result<Self> {
        Ok(Self::in_dir(executable_dir()?))
    }

    /// Configuration from optional overrides.
    ///
    /// The executable's directory is only looked up for paths that are not given.
    pub fn resolve(credentials_path: Option<PathBuf>, token_path: Option<PathBuf>) -> Result<Self> {
        let (credentials_path, token_path) = match (credentials_path, token_path) {
            (Some(credentials), Some(token)) => (credentials, token),
            (credentials, token) => {
                let dir = executable_dir()?;
                (
                    credentials.unwrap_or_else(|| dir.join(CREDENTIALS_FILE)),
                    token.unwrap_or_else(|| dir.join(TOKEN_FILE)),
                )
            }
        };

        Ok(Self {
            credentials_path,
            token_path,
            api_base: DRIVE_API_BASE.to_string(),
        })
    }

    /// Point the Drive client at a different API base (used by tests).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| DriveError::ConfigError(format!("Cannot locate executable: {}", e)))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| DriveError::ConfigError(format!("Cannot resolve directory of {}", exe.display())))
}
