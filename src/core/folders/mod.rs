// Drive folder browsing: listing, classification, and navigation state.
// The Drive HTTP client lives in infra; this module only knows the `DriveClient` port.

pub mod folder_models;
pub mod folder_service;
pub mod natural_order;

pub use folder_models::{
    Corpus, DriveItem, FilePage, FolderListing, FolderView, ListRequest, NavigationState, NewFile,
    SharedDrive,
};
pub use folder_service::{DriveClient, DriveError, FolderBrowser};
