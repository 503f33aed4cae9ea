//! Google Drive API client for file lookup and permission changes.

use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;

use crate::auth::Authenticator;
use crate::error::{DriveError, Result};
use crate::models::{
    ApiErrorResponse, FileListResponse, FileMetadata, NewPermission, Permission, Role,
};
use crate::validate::escape_query_value;

/// Fields requested for permission responses.
const PERMISSION_FIELDS: &str = "id, role, type, emailAddress, pendingOwner";

/// Body of a permissions.update request.
#[derive(Serialize)]
struct RoleUpdate {
    role: Role,
}

/// Client for the Drive v3 REST API.
pub struct DriveClient {
    auth: Authenticator,
    http: Client,
    base_url: String,
}

impl DriveClient {
    /// Create a client against the given API base URL.
    pub fn with_base_url(auth: Authenticator, base_url: impl Into<String>) -> Self {
        Self {
            auth,
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Find files whose name is exactly `name`.
    pub async fn find_files_by_name(&self, name: &str) -> Result<Vec<FileMetadata>> {
        let query = format!("name = '{}'", escape_query_value(name));
        self.query_files(&query).await
    }

    /// Query files using Google Drive query syntax, following every page.
    pub async fn query_files(&self, query: &str) -> Result<Vec<FileMetadata>> {
        let token = self.auth.get_access_token().await?;
        let mut all_files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            debug!(query, page_token = ?page_token, "Listing files");
            let mut request = self
                .http
                .get(format!("{}/files", self.base_url))
                .bearer_auth(&token)
                .query(&[
                    ("q", query),
                    ("fields", "nextPageToken, files(id, name, mimeType)"),
                ]);

            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = check_response(request.send().await?).await?;
            let list_response: FileListResponse = response.json().await?;
            all_files.extend(list_response.files);

            match list_response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(all_files)
    }

    /// Create a permission on a file.
    pub async fn create_permission(
        &self,
        file_id: &str,
        permission: &NewPermission,
    ) -> Result<Permission> {
        let token = self.auth.get_access_token().await?;
        debug!(file_id, role = ?permission.role, "Creating permission");

        let response = self
            .http
            .post(format!("{}/files/{}/permissions", self.base_url, file_id))
            .bearer_auth(&token)
            .query(&[("fields", PERMISSION_FIELDS)])
            .json(permission)
            .send()
            .await?;

        let response = check_response(response).await?;
        let created: Permission = response.json().await?;
        Ok(created)
    }

    /// Change the role of an existing permission.
    ///
    /// # Arguments
    /// * `file_id` - The file the permission belongs to
    /// * `permission_id` - The permission to update
    /// * `role` - The new role
    /// * `transfer_ownership` - Must be set when `role` is [`Role::Owner`]
    pub async fn update_permission(
        &self,
        file_id: &str,
        permission_id: &str,
        role: Role,
        transfer_ownership: bool,
    ) -> Result<Permission> {
        let token = self.auth.get_access_token().await?;
        debug!(file_id, permission_id, ?role, transfer_ownership, "Updating permission");

        let response = self
            .http
            .patch(format!(
                "{}/files/{}/permissions/{}",
                self.base_url, file_id, permission_id
            ))
            .bearer_auth(&token)
            .query(&[
                ("transferOwnership", if transfer_ownership { "true" } else { "false" }),
                ("fields", PERMISSION_FIELDS),
            ])
            .json(&RoleUpdate { role })
            .send()
            .await?;

        let response = check_response(response).await?;
        let updated: Permission = response.json().await?;
        Ok(updated)
    }
}

/// Turn a non-success response into an [`DriveError::ApiError`].
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
        return Err(DriveError::ApiError {
            status: api_error.error.code,
            message: api_error.error.message,
        });
    }

    Err(DriveError::ApiError {
        status: status.as_u16(),
        message: error_body,
    })
}
