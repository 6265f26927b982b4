use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cat_request::{build_image_request, CatImageRequest, CatOptions};
use super::tags::{build_tag_choices, TagChoices, DEFAULT_TAGS};

/// Errors raised while talking to the image API.
#[derive(Debug, Error)]
pub enum CatError {
    /// The API answered 404 because no cat matches the requested tags.
    #[error("No cat matches the requested tags")]
    NoSuchCat,
    #[error("Cat API error: {0}")]
    Api(String),
}

/// JSON reply of `GET /cat/...?json=true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CataasReply {
    pub id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub url: String,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Raw image bytes, used when a cat gets saved somewhere.
#[derive(Debug, Clone)]
pub struct CatImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// The image API operations the add-on needs.
#[async_trait]
pub trait CatImageApi: Send + Sync {
    /// Asks for a cat matching the request and returns its metadata.
    async fn fetch_cat(&self, request: &CatImageRequest) -> Result<CataasReply, CatError>;

    /// The full tag vocabulary.
    async fn list_tags(&self) -> Result<Vec<String>, CatError>;

    /// Downloads the image behind a cat URL.
    async fn download(&self, url: &str) -> Result<CatImage, CatError>;

    /// Base URL used to build direct image links.
    fn base_url(&self) -> &str;
}

// Lets the service hold a boxed provider chosen at startup.
#[async_trait]
impl CatImageApi for Box<dyn CatImageApi> {
    async fn fetch_cat(&self, request: &CatImageRequest) -> Result<CataasReply, CatError> {
        (**self).fetch_cat(request).await
    }

    async fn list_tags(&self) -> Result<Vec<String>, CatError> {
        (**self).list_tags().await
    }

    async fn download(&self, url: &str) -> Result<CatImage, CatError> {
        (**self).download(url).await
    }

    fn base_url(&self) -> &str {
        (**self).base_url()
    }
}

/// Orchestrates cat requests and tag suggestions for the card layer.
pub struct CatService<A: CatImageApi> {
    api: A,
    tag_sample_size: usize,
}

impl<A: CatImageApi> CatService<A> {
    pub fn new(api: A, tag_sample_size: usize) -> Self {
        Self {
            api,
            tag_sample_size,
        }
    }

    /// Validates the options and asks the API for a matching cat.
    ///
    /// Returns the request that was actually sent so the card can show the
    /// normalized values back to the user.
    pub async fn fetch_cat(
        &self,
        options: &CatOptions,
    ) -> Result<(CatImageRequest, CataasReply), CatError> {
        let request = build_image_request(options);
        tracing::debug!(url = %request.to_url(self.api.base_url()), "Requesting cat");

        let reply = self.api.fetch_cat(&request).await?;
        tracing::info!(cat_id = %reply.id, tags = reply.tags.len(), "Cat fetched");

        Ok((request, reply))
    }

    /// Builds the tag suggestions for the multi-select input.
    ///
    /// If the vocabulary cannot be fetched, only the already-selected and default
    /// tags are offered instead of failing the whole card.
    pub async fn tag_choices(&self, selected: &[String]) -> TagChoices {
        let vocabulary = match self.api.list_tags().await {
            Ok(tags) => tags,
            Err(e) => {
                tracing::warn!("Could not fetch tag vocabulary: {}", e);
                DEFAULT_TAGS.iter().map(|t| t.to_string()).collect()
            }
        };

        let mut rng = rand::thread_rng();
        build_tag_choices(&vocabulary, self.tag_sample_size, selected, &mut rng)
    }

    pub async fn download(&self, url: &str) -> Result<CatImage, CatError> {
        self.api.download(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records requests and answers from canned data.
    struct FakeCatApi {
        reply: Result<CataasReply, String>,
        tags: Option<Vec<String>>,
        seen: Mutex<Vec<CatImageRequest>>,
    }

    impl FakeCatApi {
        fn with_reply(reply: CataasReply) -> Self {
            Self {
                reply: Ok(reply),
                tags: Some(vec!["fluffy".to_string(), "sleepy".to_string()]),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CatImageApi for FakeCatApi {
        async fn fetch_cat(&self, request: &CatImageRequest) -> Result<CataasReply, CatError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(e) if e == "404" => Err(CatError::NoSuchCat),
                Err(e) => Err(CatError::Api(e.clone())),
            }
        }

        async fn list_tags(&self) -> Result<Vec<String>, CatError> {
            self.tags
                .clone()
                .ok_or_else(|| CatError::Api("tags unavailable".to_string()))
        }

        async fn download(&self, _url: &str) -> Result<CatImage, CatError> {
            Ok(CatImage {
                bytes: vec![1, 2, 3],
                mime_type: "image/png".to_string(),
            })
        }

        fn base_url(&self) -> &str {
            "https://cats.test"
        }
    }

    fn reply() -> CataasReply {
        CataasReply {
            id: "abc".to_string(),
            tags: vec!["orange".to_string()],
            url: "https://cats.test/cat/abc".to_string(),
            mimetype: Some("image/jpeg".to_string()),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn fetch_cat_sends_validated_request() {
        let service = CatService::new(FakeCatApi::with_reply(reply()), 20);

        let (request, reply) = service
            .fetch_cat(&CatOptions {
                message: Some("  hola   gato ".to_string()),
                width: Some("5000".to_string()),
                ..CatOptions::default()
            })
            .await
            .unwrap();

        assert_eq!(reply.id, "abc");
        assert_eq!(request.caption, "hola gato");
        assert_eq!(request.width, 640);
        assert_eq!(service.api.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_such_cat_is_reported_distinctly() {
        let mut api = FakeCatApi::with_reply(reply());
        api.reply = Err("404".to_string());
        let service = CatService::new(api, 20);

        let result = service.fetch_cat(&CatOptions::default()).await;
        assert!(matches!(result, Err(CatError::NoSuchCat)));
    }

    #[tokio::test]
    async fn tag_choices_fall_back_to_defaults_when_vocabulary_fails() {
        let mut api = FakeCatApi::with_reply(reply());
        api.tags = None;
        let service = CatService::new(api, 20);

        let choices = service.tag_choices(&["Grumpy".to_string()]).await;
        let values: Vec<&str> = choices.items.iter().map(|c| c.value.as_str()).collect();

        assert_eq!(values, vec!["Grumpy", "cute", "kitten", "orange", "small"]);
        assert!(choices.items[0].selected);
    }

    #[tokio::test]
    async fn boxed_api_delegates() {
        let boxed: Box<dyn CatImageApi> = Box::new(FakeCatApi::with_reply(reply()));
        let service = CatService::new(boxed, 4);

        let image = service.download("https://cats.test/cat/abc").await.unwrap();
        assert_eq!(image.mime_type, "image/png");
    }
}
