//! Locate a file by name and request an ownership transfer for it.
//!
//! Drive only records the request. The recipient may still have to accept
//! the transfer from their own account before ownership changes hands.

use tracing::info;

use crate::auth::{AuthCodePrompt, Authenticator};
use crate::client::DriveClient;
use crate::config::Config;
use crate::error::{DriveError, Result};
use crate::models::{FileMetadata, NewPermission, Permission, Role};
use crate::validate::validate_email;

/// What the user asked for.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub file_name: String,
    pub new_owner: String,
}

impl TransferRequest {
    /// Check the user's input.
    ///
    /// The file name is kept verbatim, since Drive matches names exactly;
    /// it only has to contain something besides whitespace.
    pub fn new(file_name: impl Into<String>, new_owner: &str) -> Result<Self> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(DriveError::InvalidFileName(file_name));
        }

        Ok(Self {
            file_name,
            new_owner: validate_email(new_owner)?,
        })
    }
}

/// Result of a run.
#[derive(Debug, Clone)]
pub enum TransferOutcome {
    /// No file carries the requested name; nothing was changed.
    FileNotFound,
    /// Drive accepted the ownership transfer request.
    Requested {
        file: FileMetadata,
        permission: Permission,
    },
}

/// Search for `name` and return the first match.
pub async fn locate_file(client: &DriveClient, name: &str) -> Result<Option<FileMetadata>> {
    let files = client.find_files_by_name(name).await?;

    for file in &files {
        info!(name = %file.name, id = %file.id, "Found file");
    }

    Ok(files.into_iter().next())
}

/// Grant `new_owner` write access, then promote that permission to owner.
pub async fn transfer_ownership(
    client: &DriveClient,
    file_id: &str,
    new_owner: &str,
) -> Result<Permission> {
    let created = client
        .create_permission(file_id, &NewPermission::user(Role::Writer, new_owner))
        .await?;

    let permission_id = created.id.ok_or_else(|| {
        DriveError::UnexpectedResponse("created permission has no id".to_string())
    })?;

    client
        .update_permission(file_id, &permission_id, Role::Owner, true)
        .await
}

/// Authorize, locate the file and request the transfer.
pub async fn run<P>(config: &Config, request: &TransferRequest, prompt: &P) -> Result<TransferOutcome>
where
    P: AuthCodePrompt + ?Sized,
{
    let auth = Authenticator::authorize(config, prompt).await?;
    let client = DriveClient::with_base_url(auth, config.api_base.as_str());

    let Some(file) = locate_file(&client, &request.file_name).await? else {
        return Ok(TransferOutcome::FileNotFound);
    };

    let permission = transfer_ownership(&client, &file.id, &request.new_owner).await?;
    info!(file_id = %file.id, new_owner = %request.new_owner, "Ownership transfer requested");

    Ok(TransferOutcome::Requested { file, permission })
}
