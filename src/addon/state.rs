// State shared by every handler.

use chrono::Utc;
use std::sync::Arc;

use super::cards::CardRegistry;
use super::config::AddonConfig;
use super::endpoints::CardContext;
use crate::core::access::WorkspaceConnector;
use crate::core::cats::{CatImageApi, CatService};

/// Passed to handlers via `State<AppState>`; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AddonConfig>,
    pub cats: Arc<CatService<Box<dyn CatImageApi>>>,
    pub workspace: Arc<dyn WorkspaceConnector>,
    pub cards: Arc<CardRegistry>,
}

impl AppState {
    pub fn new(
        config: AddonConfig,
        cat_api: Box<dyn CatImageApi>,
        workspace: Arc<dyn WorkspaceConnector>,
        cards: CardRegistry,
    ) -> Self {
        let tag_sample_size = config.tag_sample_size;
        Self {
            config: Arc::new(config),
            cats: Arc::new(CatService::new(cat_api, tag_sample_size)),
            workspace,
            cards: Arc::new(cards),
        }
    }

    /// Card inputs for the current request.
    pub fn card_context(&self) -> CardContext {
        CardContext {
            public_url: self.config.public_url.clone(),
            icon_base_url: self.config.icon_base_url.clone(),
            cataas_base_url: self.config.cataas_base_url.clone(),
            now_ms: Utc::now().timestamp_millis(),
        }
    }
}
