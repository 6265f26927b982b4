// In-memory fakes for handler tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::addon::cards::CardRegistry;
use crate::addon::config::AddonConfig;
use crate::addon::event::AddonEvent;
use crate::addon::state::AppState;
use crate::core::access::{AuthError, WorkspaceConnector};
use crate::core::cats::{CatError, CatImage, CatImageApi, CatImageRequest, CataasReply};
use crate::core::documents::{DocsClient, DocsError};
use crate::core::folders::folder_models::FOLDER_MIME_TYPE;
use crate::core::folders::{
    DriveClient, DriveError, DriveItem, FilePage, ListRequest, NewFile, SharedDrive,
};

pub struct FakeCats {
    pub reply: Mutex<Option<CataasReply>>,
    pub requests: Mutex<Vec<CatImageRequest>>,
}

impl FakeCats {
    pub fn finding(id: &str, tags: &[&str]) -> Self {
        Self {
            reply: Mutex::new(Some(CataasReply {
                id: id.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                url: format!("https://cataas.com/cat/{}", id),
                mimetype: Some("image/png".to_string()),
                created_at: None,
            })),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request answers "Cat not found".
    pub fn none() -> Self {
        Self {
            reply: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CatImageApi for Arc<FakeCats> {
    async fn fetch_cat(&self, request: &CatImageRequest) -> Result<CataasReply, CatError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.lock().unwrap().clone().ok_or(CatError::NoSuchCat)
    }

    async fn list_tags(&self) -> Result<Vec<String>, CatError> {
        Ok(vec!["cute".to_string(), "orange".to_string(), "sleepy".to_string()])
    }

    async fn download(&self, url: &str) -> Result<CatImage, CatError> {
        Ok(CatImage {
            bytes: url.as_bytes().to_vec(),
            mime_type: "image/png".to_string(),
        })
    }

    fn base_url(&self) -> &str {
        "https://cataas.com"
    }
}

#[derive(Default)]
pub struct FakeDrive {
    pub items: HashMap<String, DriveItem>,
    pub children: HashMap<String, Vec<DriveItem>>,
    pub drives: Vec<SharedDrive>,
    pub created: Mutex<Vec<NewFile>>,
}

impl FakeDrive {
    /// "My Drive" root holding the folder `pics`, which holds `kittens` and one file.
    pub fn sample() -> Self {
        let folder = |id: &str, name: &str, parent: &str| DriveItem {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: FOLDER_MIME_TYPE.to_string(),
            drive_id: None,
            parents: if parent.is_empty() {
                Vec::new()
            } else {
                vec![parent.to_string()]
            },
            owned_by_me: Some(true),
        };
        let photo = DriveItem {
            id: "photo".to_string(),
            name: "gato.png".to_string(),
            mime_type: "image/png".to_string(),
            parents: vec!["pics".to_string()],
            owned_by_me: Some(true),
            ..DriveItem::default()
        };

        let mut drive = Self::default();
        for item in [
            folder("root", "Mi unidad", ""),
            folder("pics", "Fotos", "root"),
            folder("kittens", "Gatitos", "pics"),
            photo.clone(),
        ] {
            drive.items.insert(item.id.clone(), item);
        }
        drive.children.insert(
            "pics".to_string(),
            vec![folder("kittens", "Gatitos", "pics"), photo],
        );
        drive.drives = vec![SharedDrive {
            id: "0AShared".to_string(),
            name: "Equipo".to_string(),
        }];
        drive
    }
}

fn parent_in_query(query: &str) -> &str {
    query
        .split('\'')
        .nth(1)
        .unwrap_or_default()
}

#[async_trait]
impl DriveClient for Arc<FakeDrive> {
    async fn list_children(&self, request: &ListRequest) -> Result<FilePage, DriveError> {
        let parent = parent_in_query(&request.query);
        Ok(FilePage {
            files: self.children.get(parent).cloned().unwrap_or_default(),
            next_page_token: None,
        })
    }

    async fn get_item(&self, item_id: &str) -> Result<DriveItem, DriveError> {
        self.items
            .get(item_id)
            .cloned()
            .ok_or_else(|| DriveError::NotFound(item_id.to_string()))
    }

    async fn get_drive_name(&self, drive_id: &str) -> Result<String, DriveError> {
        self.drives
            .iter()
            .find(|d| d.id == drive_id)
            .map(|d| d.name.clone())
            .ok_or_else(|| DriveError::NotFound(drive_id.to_string()))
    }

    async fn list_drives(&self) -> Result<Vec<SharedDrive>, DriveError> {
        Ok(self.drives.clone())
    }

    async fn create_file(&self, file: NewFile) -> Result<DriveItem, DriveError> {
        let item = DriveItem {
            id: format!("new-{}", file.name),
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            parents: vec![file.parent_id.clone()],
            ..DriveItem::default()
        };
        self.created.lock().unwrap().push(file);
        Ok(item)
    }
}

#[derive(Default)]
pub struct FakeDocs {
    pub updates: Mutex<Vec<(String, Vec<Value>)>>,
}

#[async_trait]
impl DocsClient for Arc<FakeDocs> {
    async fn batch_update(
        &self,
        document_id: &str,
        requests: Vec<Value>,
    ) -> Result<(), DocsError> {
        self.updates
            .lock()
            .unwrap()
            .push((document_id.to_string(), requests));
        Ok(())
    }
}

/// Hands out the shared fakes; with `authorized == false` it behaves like a
/// server with no service account and an event with no token.
pub struct FakeWorkspace {
    pub drive: Arc<FakeDrive>,
    pub docs: Arc<FakeDocs>,
    pub authorized: bool,
}

#[async_trait]
impl WorkspaceConnector for FakeWorkspace {
    async fn drive(&self, _user_token: Option<&str>) -> Result<Box<dyn DriveClient>, AuthError> {
        if !self.authorized {
            return Err(AuthError::MissingCredentials);
        }
        Ok(Box::new(self.drive.clone()))
    }

    async fn docs(&self, _user_token: Option<&str>) -> Result<Box<dyn DocsClient>, AuthError> {
        if !self.authorized {
            return Err(AuthError::MissingCredentials);
        }
        Ok(Box::new(self.docs.clone()))
    }
}

pub struct Harness {
    pub state: AppState,
    pub cats: Arc<FakeCats>,
    pub drive: Arc<FakeDrive>,
    pub docs: Arc<FakeDocs>,
}

pub fn harness_with(cats: FakeCats, authorized: bool) -> Harness {
    let cats = Arc::new(cats);
    let drive = Arc::new(FakeDrive::sample());
    let docs = Arc::new(FakeDocs::default());

    let config = AddonConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        public_url: "https://addon.example".to_string(),
        cataas_base_url: "https://cataas.com".to_string(),
        icon_base_url: "https://icons.example/images".to_string(),
        tag_sample_size: 3,
    };
    let workspace = FakeWorkspace {
        drive: drive.clone(),
        docs: docs.clone(),
        authorized,
    };

    let state = AppState::new(
        config,
        Box::new(cats.clone()),
        Arc::new(workspace),
        CardRegistry::standard(),
    );

    Harness {
        state,
        cats,
        drive,
        docs,
    }
}

pub fn harness() -> Harness {
    harness_with(FakeCats::finding("abc123", &["cute", "orange"]), true)
}

pub fn event(value: Value) -> AddonEvent {
    serde_json::from_value(value).unwrap()
}

/// Event with the given host app and action parameters.
pub fn event_with_params(host_app: &str, params: &[(&str, &str)]) -> AddonEvent {
    let parameters: HashMap<&str, &str> = params.iter().copied().collect();
    event(json!({
        "commonEventObject": {
            "hostApp": host_app,
            "parameters": parameters,
        },
        "authorizationEventObject": { "userOAuthToken": "ya29.token" }
    }))
}
