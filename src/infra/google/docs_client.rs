use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::documents::{DocsClient, DocsError};

const DOCS_API_URL: &str = "https://docs.googleapis.com/v1";

/// Docs v1 client bound to one access token.
pub struct DocsApiClient {
    client: Client,
    token: String,
    api_url: String,
}

impl DocsApiClient {
    pub fn new(client: Client, token: String) -> Self {
        Self {
            client,
            token,
            api_url: DOCS_API_URL.to_string(),
        }
    }

    fn batch_update_url(&self, document_id: &str) -> String {
        format!("{}/documents/{}:batchUpdate", self.api_url, document_id)
    }
}

#[async_trait]
impl DocsClient for DocsApiClient {
    async fn batch_update(&self, document_id: &str, requests: Vec<Value>) -> Result<(), DocsError> {
        let resp = self
            .client
            .post(self.batch_update_url(document_id))
            .bearer_auth(&self.token)
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(|e| DocsError::Api(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(DocsError::Api(format!(
                "Docs returned {} for batchUpdate: {}",
                status, text
            )));
        }

        Ok(())
    }
}
