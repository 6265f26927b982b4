// Service account OAuth for Google APIs.
//
// Used only when an event arrives without a user token. The key comes from
// `GOOGLE_SERVICE_ACCOUNT_KEY` (a path) or `GOOGLE_SERVICE_ACCOUNT_JSON` (the
// JSON itself), and the files it should touch must be shared with the
// service account email.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::core::access::AuthError;

const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Scopes requested for the service account.
pub const WORKSPACE_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/documents",
];

/// Tokens live an hour; we treat them as stale a bit earlier.
const TOKEN_LIFETIME: Duration = Duration::from_secs(55 * 60);
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountCredentials {
    client_email: String,
    /// PEM-encoded RSA key.
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

struct CachedToken {
    token: String,
    expires_at: SystemTime,
}

/// Exchanges signed JWT assertions for access tokens and caches the result.
pub struct ServiceAccountAuth {
    credentials: ServiceAccountCredentials,
    scopes: String,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl ServiceAccountAuth {
    pub async fn from_file(path: &str, client: Client) -> Result<Self, AuthError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AuthError::InvalidKey(format!("{}: {}", path, e)))?;
        Self::from_json(&content, client)
    }

    pub fn from_json(json: &str, client: Client) -> Result<Self, AuthError> {
        let credentials: ServiceAccountCredentials =
            serde_json::from_str(json).map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        Ok(Self {
            credentials,
            scopes: WORKSPACE_SCOPES.join(" "),
            client,
            cached_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Loads credentials from the environment. `Ok(None)` when neither variable is set.
    pub async fn from_env(client: Client) -> Result<Option<Self>, AuthError> {
        if let Ok(path) = std::env::var("GOOGLE_SERVICE_ACCOUNT_KEY") {
            return Self::from_file(&path, client).await.map(Some);
        }

        if let Ok(json) = std::env::var("GOOGLE_SERVICE_ACCOUNT_JSON") {
            return Self::from_json(&json, client).map(Some);
        }

        Ok(None)
    }

    pub fn client_email(&self) -> &str {
        &self.credentials.client_email
    }

    /// Returns a valid access token, refreshing it when close to expiry.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at > SystemTime::now() + REFRESH_MARGIN {
                    return Ok(token.token.clone());
                }
            }
        }

        let new_token = self.fetch_new_token().await?;

        {
            let mut cached = self.cached_token.write().await;
            *cached = Some(CachedToken {
                token: new_token.clone(),
                expires_at: SystemTime::now() + TOKEN_LIFETIME,
            });
        }

        tracing::debug!(email = %self.credentials.client_email, "Refreshed service account token");
        Ok(new_token)
    }

    fn signed_assertion(&self) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?
            .as_secs();

        let claims = JwtClaims {
            iss: self.credentials.client_email.clone(),
            scope: self.scopes.clone(),
            aud: self.credentials.token_uri.clone(),
            iat: now,
            exp: now + 3600,
        };

        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| AuthError::InvalidKey(e.to_string()))
    }

    async fn fetch_new_token(&self) -> Result<String, AuthError> {
        let jwt = self.signed_assertion()?;

        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", &jwt),
            ])
            .send()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchange(format!("{}: {}", status, text)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
        Ok(token.access_token)
    }
}
