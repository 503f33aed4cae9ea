//! OAuth2 authorization-code authentication for Google APIs.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, Url};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{DriveError, Result};
use crate::models::{ClientSecret, ClientSecretFile, StoredToken, TokenResponse};

/// Google Drive API scope.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Refresh this long before the recorded expiry.
const EXPIRY_BUFFER_MS: u64 = 60_000;

/// Source of the authorization code the user copies from the consent page.
pub trait AuthCodePrompt {
    /// Show `auth_url` to the user and return the code they paste back.
    fn request_code(&self, auth_url: &str) -> Result<String>;
}

/// Authenticator holding the client secret and the current token.
#[derive(Clone)]
pub struct Authenticator {
    secret: Arc<ClientSecret>,
    token_path: PathBuf,
    client: Client,
    token: Arc<RwLock<StoredToken>>,
}

impl Authenticator {
    /// Load credentials and produce an authorized authenticator.
    ///
    /// Reuses the cached token file when it holds a well-formed token;
    /// otherwise runs the consent flow through `prompt` and stores the
    /// resulting token.
    pub async fn authorize<P>(config: &Config, prompt: &P) -> Result<Self>
    where
        P: AuthCodePrompt + ?Sized,
    {
        let secret = load_client_secret(&config.credentials_path)?;
        let client = Client::new();

        if let Some(token) = load_token(&config.token_path) {
            debug!(path = %config.token_path.display(), "Using cached token");
            return Ok(Self::with_token(secret, config.token_path.clone(), token));
        }

        let auth_url = authorization_url(&secret)?;
        let code = prompt.request_code(auth_url.as_str())?;
        let token = exchange_code(&client, &secret, code.trim()).await?;

        match save_token(&config.token_path, &token) {
            Ok(()) => info!(path = %config.token_path.display(), "Token stored"),
            Err(e) => warn!(path = %config.token_path.display(), error = %e, "Failed to store token"),
        }

        Ok(Self {
            secret: Arc::new(secret),
            token_path: config.token_path.clone(),
            client,
            token: Arc::new(RwLock::new(token)),
        })
    }

    /// Create an authenticator from an already obtained token.
    pub fn with_token(secret: ClientSecret, token_path: PathBuf, token: StoredToken) -> Self {
        Self {
            secret: Arc::new(secret),
            token_path,
            client: Client::new(),
            token: Arc::new(RwLock::new(token)),
        }
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_access_token(&self) -> Result<String> {
        {
            let token = self.token.read().await;
            if !token.is_expired(now_millis(), EXPIRY_BUFFER_MS) {
                return Ok(token.access_token.clone());
            }
        }

        let mut token = self.token.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if !token.is_expired(now_millis(), EXPIRY_BUFFER_MS) {
            return Ok(token.access_token.clone());
        }

        let refresh_token = token.refresh_token.clone().ok_or_else(|| {
            DriveError::TokenRefreshError(
                "access token expired and no refresh token is stored".to_string(),
            )
        })?;

        let mut refreshed = self.refresh(&refresh_token).await?;
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = Some(refresh_token);
        }

        if let Err(e) = save_token(&self.token_path, &refreshed) {
            warn!(path = %self.token_path.display(), error = %e, "Failed to store refreshed token");
        }

        *token = refreshed;
        Ok(token.access_token.clone())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<StoredToken> {
        debug!("Refreshing access token");
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(self.secret.token_uri())
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::TokenRefreshError(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(StoredToken::from_response(token_response, now_millis()))
    }
}

/// Read the client secrets file.
pub fn load_client_secret<P: AsRef<Path>>(path: P) -> Result<ClientSecret> {
    let content = fs::read_to_string(path)?;
    let file: ClientSecretFile = serde_json::from_str(&content)?;
    let secret = file.into_secret().ok_or_else(|| {
        DriveError::AuthenticationError(
            "credentials file has neither a \"web\" nor an \"installed\" section".to_string(),
        )
    })?;

    if secret.redirect_uri().is_none() {
        return Err(DriveError::AuthenticationError(
            "credentials file lists no redirect URI".to_string(),
        ));
    }

    Ok(secret)
}

/// Read the cached token, if present and well-formed.
pub fn load_token<P: AsRef<Path>>(path: P) -> Option<StoredToken> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(token) => Some(token),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable token file");
            None
        }
    }
}

/// Write the token to the cache file.
pub fn save_token<P: AsRef<Path>>(path: P, token: &StoredToken) -> Result<()> {
    let content = serde_json::to_string(token)?;
    fs::write(path, content)?;
    Ok(())
}

/// Build the consent page URL requesting offline Drive access.
pub fn authorization_url(secret: &ClientSecret) -> Result<Url> {
    let redirect_uri = secret.redirect_uri().unwrap_or_default();
    Url::parse_with_params(
        secret.auth_uri(),
        &[
            ("access_type", "offline"),
            ("scope", DRIVE_SCOPE),
            ("response_type", "code"),
            ("client_id", secret.client_id.as_str()),
            ("redirect_uri", redirect_uri),
        ],
    )
    .map_err(|e| DriveError::AuthenticationError(format!("Invalid auth_uri: {}", e)))
}

/// Exchange an authorization code for a token.
async fn exchange_code(client: &Client, secret: &ClientSecret, code: &str) -> Result<StoredToken> {
    let redirect_uri = secret.redirect_uri().unwrap_or_default();
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", secret.client_id.as_str()),
        ("client_secret", secret.client_secret.as_str()),
        ("redirect_uri", redirect_uri),
    ];

    let response = client.post(secret.token_uri()).form(&params).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(DriveError::TokenExchangeError(format!(
            "Status {}: {}",
            status, body
        )));
    }

    let token_response: TokenResponse = response.json().await?;
    Ok(StoredToken::from_response(token_response, now_millis()))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
