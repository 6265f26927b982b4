use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use super::docs_client::DocsApiClient;
use super::drive_client::DriveApiClient;
use super::service_account::ServiceAccountAuth;
use crate::core::access::{AuthError, WorkspaceConnector};
use crate::core::documents::DocsClient;
use crate::core::folders::DriveClient;

/// Builds Drive and Docs clients from the event's user token, or from the
/// service account when the event has none.
pub struct GoogleConnector {
    client: Client,
    service_account: Option<Arc<ServiceAccountAuth>>,
}

impl GoogleConnector {
    pub fn new(client: Client, service_account: Option<ServiceAccountAuth>) -> Self {
        Self {
            client,
            service_account: service_account.map(Arc::new),
        }
    }

    async fn token(&self, user_token: Option<&str>) -> Result<String, AuthError> {
        if let Some(token) = user_token.map(str::trim).filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }

        match &self.service_account {
            Some(auth) => {
                tracing::debug!("No user token in event, using service account");
                auth.access_token().await
            }
            None => Err(AuthError::MissingCredentials),
        }
    }
}

#[async_trait]
impl WorkspaceConnector for GoogleConnector {
    async fn drive(&self, user_token: Option<&str>) -> Result<Box<dyn DriveClient>, AuthError> {
        let token = self.token(user_token).await?;
        Ok(Box::new(DriveApiClient::new(self.client.clone(), token)))
    }

    async fn docs(&self, user_token: Option<&str>) -> Result<Box<dyn DocsClient>, AuthError> {
        let token = self.token(user_token).await?;
        Ok(Box::new(DocsApiClient::new(self.client.clone(), token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn user_token_is_preferred() {
        let connector = GoogleConnector::new(Client::new(), None);
        assert_eq!(connector.token(Some(" ya29.abc ")).await.unwrap(), "ya29.abc");
        assert!(connector.drive(Some("ya29.abc")).await.is_ok());
    }

    #[tokio::test]
    async fn no_credentials_is_an_error() {
        let connector = GoogleConnector::new(Client::new(), None);
        assert!(matches!(
            connector.docs(None).await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            connector.drive(Some("")).await,
            Err(AuthError::MissingCredentials)
        ));
    }
}
