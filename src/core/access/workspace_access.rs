// How a request gets Google API clients. Every event carries the user's OAuth
// token; a service account can stand in when it doesn't.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::documents::DocsClient;
use crate::core::folders::DriveClient;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No user token in the event and no service account configured")]
    MissingCredentials,
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),
}

/// Hands out request-scoped Google API clients.
#[async_trait]
pub trait WorkspaceConnector: Send + Sync {
    async fn drive(&self, user_token: Option<&str>) -> Result<Box<dyn DriveClient>, AuthError>;

    async fn docs(&self, user_token: Option<&str>) -> Result<Box<dyn DocsClient>, AuthError>;
}
