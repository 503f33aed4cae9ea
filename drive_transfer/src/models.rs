//! Data models for Google OAuth2 and Drive API payloads.

use serde::{Deserialize, Serialize};

/// Default Google OAuth2 consent endpoint.
pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";

/// Default Google OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Client secrets file as downloaded from the Google Cloud Console.
///
/// The console nests the actual secret under `web` or `installed`
/// depending on the client type.
#[derive(Debug, Deserialize)]
pub struct ClientSecretFile {
    #[serde(default)]
    pub web: Option<ClientSecret>,
    #[serde(default)]
    pub installed: Option<ClientSecret>,
}

impl ClientSecretFile {
    /// Pick the client section, preferring `web`.
    pub fn into_secret(self) -> Option<ClientSecret> {
        self.web.or(self.installed)
    }
}

/// OAuth2 client credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default)]
    pub auth_uri: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ClientSecret {
    pub fn auth_uri(&self) -> &str {
        self.auth_uri.as_deref().unwrap_or(DEFAULT_AUTH_URI)
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }

    /// The redirect URI used for the consent flow (the first one listed).
    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uris.first().map(String::as_str)
    }
}

/// Token record persisted to the token cache file.
///
/// Same layout the Google client libraries write, with `expiry_date`
/// in milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<u64>,
}

impl StoredToken {
    /// Build a token record from a token endpoint response received at `now_ms`.
    pub fn from_response(response: TokenResponse, now_ms: u64) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            scope: response.scope,
            token_type: response.token_type,
            expiry_date: Some(now_ms.saturating_add(response.expires_in.saturating_mul(1000))),
        }
    }

    /// Whether the token expires within `buffer_ms` of `now_ms`.
    ///
    /// Tokens without an expiry are never considered expired.
    pub fn is_expired(&self, now_ms: u64, buffer_ms: u64) -> bool {
        match self.expiry_date {
            Some(expiry) => expiry <= now_ms.saturating_add(buffer_ms),
            None => false,
        }
    }
}

/// OAuth2 token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Metadata for a file in Google Drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl std::fmt::Display for FileMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (ID: {})", self.name, self.id)
    }
}

/// Response from the files.list API endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileMetadata>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Role granted by a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Owner,
    Organizer,
    FileOrganizer,
    Writer,
    Commenter,
    Reader,
}

/// Kind of principal a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionType {
    User,
    Group,
    Domain,
    Anyone,
}

/// A permission as returned by the permissions API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(default)]
    pub id: Option<String>,
    pub role: Role,
    #[serde(rename = "type")]
    pub kind: PermissionType,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub pending_owner: Option<bool>,
}

/// Request body for permissions.create.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermission {
    pub role: Role,
    #[serde(rename = "type")]
    pub kind: PermissionType,
    pub email_address: String,
}

impl NewPermission {
    /// A user permission for `email` with the given role.
    pub fn user(role: Role, email: impl Into<String>) -> Self {
        Self {
            role,
            kind: PermissionType::User,
            email_address: email.into(),
        }
    }
}

/// Google API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}
