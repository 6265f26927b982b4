use async_trait::async_trait;
use thiserror::Error;

use super::folder_models::{
    Corpus, DriveItem, FilePage, FolderListing, FolderView, ListRequest, NavigationState, NewFile,
    SharedDrive, MY_DRIVE_NAME,
};
use super::natural_order::natural_cmp;

/// Drive serves at most this many entries per page; we only ever read one page.
pub const PAGE_SIZE: u32 = 100;

/// Most folders a card lists.
pub const MAX_FOLDERS_SHOWN: usize = 30;

/// Bounds the walk from a file up to its containing folder.
const MAX_PARENT_HOPS: usize = 4;

/// Errors that can be raised while browsing Drive.
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("Google Drive API error: {0}")]
    Api(String),
    #[error("Item not found: {0}")]
    NotFound(String),
}

/// The Drive operations the browser needs.
#[async_trait]
pub trait DriveClient: Send + Sync {
    /// Lists one page of children matching the request.
    async fn list_children(&self, request: &ListRequest) -> Result<FilePage, DriveError>;

    /// Metadata for a single file or folder.
    async fn get_item(&self, item_id: &str) -> Result<DriveItem, DriveError>;

    /// Display name of a shared drive.
    async fn get_drive_name(&self, drive_id: &str) -> Result<String, DriveError>;

    /// Shared drives visible to the user.
    async fn list_drives(&self) -> Result<Vec<SharedDrive>, DriveError>;

    /// Creates a file and returns its metadata.
    async fn create_file(&self, file: NewFile) -> Result<DriveItem, DriveError>;
}

/// Drive search query for the non-trashed children of `parent_id`.
pub fn children_query(parent_id: &str) -> String {
    let escaped = parent_id.replace('\\', "\\\\").replace('\'', "\\'");
    format!("trashed = false and '{}' in parents", escaped)
}

/// `orderBy` value for natural-name order.
pub fn name_order(reverse_order: bool) -> String {
    if reverse_order {
        "name_natural desc".to_string()
    } else {
        "name_natural".to_string()
    }
}

/// Splits a page of children into (capped) folders and a count of other files.
pub fn classify(page: FilePage) -> FolderListing {
    let mut listing = FolderListing {
        too_many_folders: page.next_page_token.is_some(),
        ..FolderListing::default()
    };

    for file in page.files {
        if file.is_folder() {
            if listing.folders.len() < MAX_FOLDERS_SHOWN {
                listing.folders.push(file);
            } else {
                listing.too_many_folders = true;
            }
        } else {
            listing.other_files_count += 1;
        }
    }

    listing
}

/// Request-scoped folder browser over a Drive client.
pub struct FolderBrowser<'a> {
    client: &'a dyn DriveClient,
}

impl<'a> FolderBrowser<'a> {
    pub fn new(client: &'a dyn DriveClient) -> Self {
        Self { client }
    }

    /// Lists the children of `item_id` and classifies them.
    ///
    /// `drive_id` selects the corpus: `None` or `"root"` is the personal drive.
    pub async fn list_folder(
        &self,
        item_id: &str,
        drive_id: Option<&str>,
        reverse_order: bool,
    ) -> Result<FolderListing, DriveError> {
        let request = ListRequest {
            query: children_query(item_id),
            corpus: Corpus::from_drive_id(drive_id),
            order_by: name_order(reverse_order),
            page_size: PAGE_SIZE,
        };

        let page = self.client.list_children(&request).await?;
        let listing = classify(page);

        tracing::debug!(
            item_id,
            folders = listing.folders.len(),
            other_files = listing.other_files_count,
            truncated = listing.too_many_folders,
            "Listed folder"
        );

        Ok(listing)
    }

    /// Shared drives in natural-name order.
    pub async fn list_drives(&self, reverse_order: bool) -> Result<Vec<SharedDrive>, DriveError> {
        let mut drives = self.client.list_drives().await?;
        drives.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        if reverse_order {
            drives.reverse();
        }
        Ok(drives)
    }

    /// Resolves what the browser shows for `item_id`.
    ///
    /// - no item: drive selection
    /// - an item shared with the user (not in any of their drives): drive selection
    /// - a file: its parent folder
    /// - a folder: that folder
    pub async fn open_item(
        &self,
        item_id: Option<&str>,
        reverse_order: bool,
    ) -> Result<FolderView, DriveError> {
        let mut current = match item_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => return self.drive_selection(reverse_order).await,
        };

        for _ in 0..MAX_PARENT_HOPS {
            let item = self.client.get_item(&current).await?;

            if item.owned_by_me == Some(false) {
                return self.drive_selection(reverse_order).await;
            }

            if !item.is_folder() {
                match item.parents.first() {
                    Some(parent) => {
                        current = parent.clone();
                        continue;
                    }
                    None => return self.drive_selection(reverse_order).await,
                }
            }

            let drive_name = match item.drive_id.as_deref() {
                Some(drive_id) => self.client.get_drive_name(drive_id).await?,
                None => MY_DRIVE_NAME.to_string(),
            };

            let state = NavigationState {
                item_id: current,
                drive_id: item.drive_id.clone(),
                name: item.name.clone(),
                drive_name,
                parent_id: item.parents.first().cloned().unwrap_or_default(),
                reverse_order,
            };

            let listing = self
                .list_folder(&state.item_id, state.drive_id.as_deref(), reverse_order)
                .await?;

            return Ok(FolderView::Folder { state, listing });
        }

        Err(DriveError::NotFound(format!(
            "no folder above {}",
            item_id.unwrap_or_default()
        )))
    }

    /// Saves a file into a folder.
    pub async fn save_file(&self, file: NewFile) -> Result<DriveItem, DriveError> {
        let parent_id = file.parent_id.clone();
        let created = self.client.create_file(file).await?;
        tracing::info!(file_id = %created.id, parent_id = %parent_id, "Created Drive file");
        Ok(created)
    }

    async fn drive_selection(&self, reverse_order: bool) -> Result<FolderView, DriveError> {
        Ok(FolderView::DriveSelection {
            drives: self.list_drives(reverse_order).await?,
            reverse_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::folders::folder_models::FOLDER_MIME_TYPE;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn folder(id: &str, parents: &[&str]) -> DriveItem {
        DriveItem {
            id: id.to_string(),
            name: format!("Folder {}", id),
            mime_type: FOLDER_MIME_TYPE.to_string(),
            drive_id: None,
            parents: parents.iter().map(|p| p.to_string()).collect(),
            owned_by_me: Some(true),
        }
    }

    fn file(id: &str, parents: &[&str]) -> DriveItem {
        DriveItem {
            mime_type: "image/png".to_string(),
            ..folder(id, parents)
        }
    }

    // In-memory Drive for testing
    #[derive(Default)]
    struct FakeDrive {
        items: HashMap<String, DriveItem>,
        pages: HashMap<String, FilePage>,
        drives: Vec<SharedDrive>,
        requests: Mutex<Vec<ListRequest>>,
        created: Mutex<Vec<NewFile>>,
    }

    #[async_trait]
    impl DriveClient for FakeDrive {
        async fn list_children(&self, request: &ListRequest) -> Result<FilePage, DriveError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self
                .pages
                .iter()
                .find(|(parent, _)| request.query.contains(parent.as_str()))
                .map(|(_, page)| page.clone())
                .unwrap_or_default())
        }

        async fn get_item(&self, item_id: &str) -> Result<DriveItem, DriveError> {
            self.items
                .get(item_id)
                .cloned()
                .ok_or_else(|| DriveError::NotFound(item_id.to_string()))
        }

        async fn get_drive_name(&self, drive_id: &str) -> Result<String, DriveError> {
            Ok(format!("Drive {}", drive_id))
        }

        async fn list_drives(&self) -> Result<Vec<SharedDrive>, DriveError> {
            Ok(self.drives.clone())
        }

        async fn create_file(&self, file: NewFile) -> Result<DriveItem, DriveError> {
            let item = DriveItem {
                id: "new-file".to_string(),
                name: file.name.clone(),
                mime_type: file.mime_type.clone(),
                parents: vec![file.parent_id.clone()],
                ..DriveItem::default()
            };
            self.created.lock().unwrap().push(file);
            Ok(item)
        }
    }

    fn page(folders: usize, files: usize, next: bool) -> FilePage {
        let mut items: Vec<DriveItem> = (0..folders)
            .map(|i| folder(&format!("f{}", i), &["parent"]))
            .collect();
        items.extend((0..files).map(|i| file(&format!("x{}", i), &["parent"])));
        FilePage {
            files: items,
            next_page_token: next.then(|| "token".to_string()),
        }
    }

    #[test]
    fn mixed_listing_is_classified() {
        let listing = classify(page(5, 3, false));
        assert_eq!(listing.folders.len(), 5);
        assert_eq!(listing.other_files_count, 3);
        assert!(!listing.too_many_folders);
    }

    #[test]
    fn folder_cap_sets_flag() {
        let listing = classify(page(35, 0, false));
        assert_eq!(listing.folders.len(), MAX_FOLDERS_SHOWN);
        assert!(listing.too_many_folders);
    }

    #[test]
    fn next_page_sets_flag() {
        let listing = classify(page(2, 1, true));
        assert_eq!(listing.folders.len(), 2);
        assert!(listing.too_many_folders);
    }

    #[test]
    fn query_escapes_quotes() {
        assert_eq!(
            children_query("abc"),
            "trashed = false and 'abc' in parents"
        );
        assert_eq!(
            children_query("it's"),
            "trashed = false and 'it\\'s' in parents"
        );
        assert_eq!(name_order(false), "name_natural");
        assert_eq!(name_order(true), "name_natural desc");
    }

    #[tokio::test]
    async fn list_folder_builds_request_for_corpus() {
        let drive = FakeDrive::default();
        let browser = FolderBrowser::new(&drive);

        browser.list_folder("abc", Some("root"), false).await.unwrap();
        browser.list_folder("abc", Some("0AShared"), true).await.unwrap();

        let requests = drive.requests.lock().unwrap();
        assert_eq!(requests[0].corpus, Corpus::User);
        assert_eq!(requests[0].page_size, PAGE_SIZE);
        assert_eq!(requests[1].corpus, Corpus::Drive("0AShared".to_string()));
        assert_eq!(requests[1].order_by, "name_natural desc");
    }

    #[tokio::test]
    async fn empty_id_shows_sorted_drives() {
        let drive = FakeDrive {
            drives: vec![
                SharedDrive {
                    id: "2".to_string(),
                    name: "Team 10".to_string(),
                },
                SharedDrive {
                    id: "1".to_string(),
                    name: "Team 9".to_string(),
                },
            ],
            ..FakeDrive::default()
        };
        let browser = FolderBrowser::new(&drive);

        match browser.open_item(None, false).await.unwrap() {
            FolderView::DriveSelection { drives, .. } => {
                assert_eq!(drives[0].name, "Team 9");
                assert_eq!(drives[1].name, "Team 10");
            }
            other => panic!("expected drive selection, got {other:?}"),
        }

        match browser.open_item(Some("  "), true).await.unwrap() {
            FolderView::DriveSelection {
                drives,
                reverse_order,
            } => {
                assert!(reverse_order);
                assert_eq!(drives[0].name, "Team 10");
            }
            other => panic!("expected drive selection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn file_resolves_to_parent_folder() {
        let mut drive = FakeDrive::default();
        drive.items.insert("doc".to_string(), file("doc", &["box"]));
        drive.items.insert("box".to_string(), folder("box", &["root-id"]));
        drive.pages.insert("box".to_string(), page(1, 2, false));
        let browser = FolderBrowser::new(&drive);

        match browser.open_item(Some("doc"), false).await.unwrap() {
            FolderView::Folder { state, listing } => {
                assert_eq!(state.item_id, "box");
                assert_eq!(state.parent_id, "root-id");
                assert_eq!(state.drive_name, MY_DRIVE_NAME);
                assert_eq!(listing.folders.len(), 1);
                assert_eq!(listing.other_files_count, 2);
            }
            other => panic!("expected folder, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn shared_drive_folder_uses_drive_name() {
        let mut drive = FakeDrive::default();
        let mut shared = folder("team-folder", &["0ADrive"]);
        shared.drive_id = Some("0ADrive".to_string());
        shared.owned_by_me = None;
        drive.items.insert("team-folder".to_string(), shared);
        let browser = FolderBrowser::new(&drive);

        match browser.open_item(Some("team-folder"), false).await.unwrap() {
            FolderView::Folder { state, .. } => {
                assert_eq!(state.drive_id.as_deref(), Some("0ADrive"));
                assert_eq!(state.drive_name, "Drive 0ADrive");
            }
            other => panic!("expected folder, got {other:?}"),
        }
        assert_eq!(
            drive.requests.lock().unwrap()[0].corpus,
            Corpus::Drive("0ADrive".to_string())
        );
    }

    #[tokio::test]
    async fn shared_with_me_item_falls_back_to_drive_selection() {
        let mut drive = FakeDrive::default();
        let mut foreign = folder("foreign", &[]);
        foreign.owned_by_me = Some(false);
        drive.items.insert("foreign".to_string(), foreign);
        let browser = FolderBrowser::new(&drive);

        let view = browser.open_item(Some("foreign"), false).await.unwrap();
        assert!(matches!(view, FolderView::DriveSelection { .. }));
    }

    #[tokio::test]
    async fn missing_item_propagates_error() {
        let drive = FakeDrive::default();
        let browser = FolderBrowser::new(&drive);

        let result = browser.open_item(Some("ghost"), false).await;
        assert!(matches!(result, Err(DriveError::NotFound(_))));
    }

    #[tokio::test]
    async fn save_file_creates_in_parent() {
        let drive = FakeDrive::default();
        let browser = FolderBrowser::new(&drive);

        let created = browser
            .save_file(NewFile {
                name: "Gato.jpg".to_string(),
                parent_id: "box".to_string(),
                mime_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8],
            })
            .await
            .unwrap();

        assert_eq!(created.parents, vec!["box".to_string()]);
        assert_eq!(drive.created.lock().unwrap().len(), 1);
    }
}
