//! drive_transfer - A CLI tool for handing a Google Drive file to a new owner.
//!
//! This library provides functionality to:
//! - Authorize against Google Drive with the OAuth2 authorization-code flow
//! - Find a file by its exact name
//! - Request an ownership transfer of that file to another account
//!
//! # Example
//!
//! ```no_run
//! use drive_transfer::{run, Config, TerminalPrompt, TransferOutcome, TransferRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::beside_executable()?;
//!     let request = TransferRequest {
//!         file_name: "report.pdf".to_string(),
//!         new_owner: "someone@gmail.com".to_string(),
//!     };
//!
//!     if let TransferOutcome::Requested { file, .. } = run(&config, &request, &TerminalPrompt).await? {
//!         println!("Transfer requested for {}", file);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod transfer;
pub mod validate;

// Re-exports for convenience
pub use auth::{AuthCodePrompt, Authenticator};
pub use client::DriveClient;
pub use config::Config;
pub use error::{DriveError, Result};
pub use models::{FileMetadata, Permission, Role};
pub use prompt::TerminalPrompt;
pub use transfer::{run, TransferOutcome, TransferRequest};
pub use validate::validate_email;
