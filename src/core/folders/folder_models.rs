/// MIME type Drive uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Sentinel drive id meaning "the user's own drive".
pub const ROOT_DRIVE_ID: &str = "root";

/// Display name for the personal drive.
pub const MY_DRIVE_NAME: &str = "Mi Unidad";

/// A file or folder, with just the metadata the browser needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DriveItem {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub drive_id: Option<String>,
    pub parents: Vec<String>,
    /// `None` for items in shared drives, `Some(false)` for items shared with the user.
    pub owned_by_me: Option<bool>,
}

impl DriveItem {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedDrive {
    pub id: String,
    pub name: String,
}

/// Search scope of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    /// The user's own storage.
    User,
    /// A specific shared drive.
    Drive(String),
}

impl Corpus {
    /// Missing, empty and `"root"` drive ids all mean the personal corpus.
    pub fn from_drive_id(drive_id: Option<&str>) -> Self {
        match drive_id.map(str::trim) {
            None | Some("") | Some(ROOT_DRIVE_ID) => Corpus::User,
            Some(id) => Corpus::Drive(id.to_string()),
        }
    }
}

/// One listing call against the Drive API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub query: String,
    pub corpus: Corpus,
    pub order_by: String,
    pub page_size: u32,
}

/// One page of listing results.
#[derive(Debug, Clone, Default)]
pub struct FilePage {
    pub files: Vec<DriveItem>,
    pub next_page_token: Option<String>,
}

/// Children of a folder split into folders and a count of everything else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FolderListing {
    pub folders: Vec<DriveItem>,
    pub other_files_count: usize,
    /// More folders exist than are shown.
    pub too_many_folders: bool,
}

/// What a folder card needs to render itself and link to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub item_id: String,
    pub drive_id: Option<String>,
    pub name: String,
    pub drive_name: String,
    /// Empty when the folder is a drive root.
    pub parent_id: String,
    pub reverse_order: bool,
}

/// What the browser should show for a requested item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderView {
    /// Pick a drive first.
    DriveSelection {
        drives: Vec<SharedDrive>,
        reverse_order: bool,
    },
    Folder {
        state: NavigationState,
        listing: FolderListing,
    },
}

/// A file to create in Drive.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub name: String,
    pub parent_id: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
