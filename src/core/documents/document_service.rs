use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocsError {
    #[error("Image URL must be absolute https: {0}")]
    InvalidImageUrl(String),
    #[error("Google Docs API error: {0}")]
    Api(String),
}

/// Port onto `documents.batchUpdate`.
#[async_trait]
pub trait DocsClient: Send + Sync {
    async fn batch_update(&self, document_id: &str, requests: Vec<Value>)
        -> Result<(), DocsError>;
}

#[async_trait]
impl DocsClient for Box<dyn DocsClient> {
    async fn batch_update(
        &self,
        document_id: &str,
        requests: Vec<Value>,
    ) -> Result<(), DocsError> {
        (**self).batch_update(document_id, requests).await
    }
}

/// `insertInlineImage` request that appends at the end of the body.
pub fn insert_image_request(image_url: &str) -> Value {
    json!({
        "insertInlineImage": {
            "uri": image_url,
            "endOfSegmentLocation": {}
        }
    })
}

fn is_absolute_https(url: &str) -> bool {
    url.strip_prefix("https://")
        .map(|rest| !rest.is_empty() && !rest.starts_with('/'))
        .unwrap_or(false)
}

/// Appends the image at `image_url` to the end of the document.
pub async fn append_image<C>(client: &C, document_id: &str, image_url: &str) -> Result<(), DocsError>
where
    C: DocsClient + ?Sized,
{
    if !is_absolute_https(image_url) {
        return Err(DocsError::InvalidImageUrl(image_url.to_string()));
    }

    client
        .batch_update(document_id, vec![insert_image_request(image_url)])
        .await?;

    tracing::info!(document_id, "Inserted cat image into document");
    Ok(())
}
