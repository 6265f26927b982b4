// Every URL the add-on serves. Card actions point back at these, so the
// paths here and the routes in `router.rs` must stay in sync.

use super::cards::card_model::Action;
use super::params::{ActionParams, ParamBag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Homepage,
    DriveHomepage,
    DriveItemsSelected,
    DocsHomepage,
    DocsFileScopeGranted,
    EditorsHomepage,
    CatSelect,
    CatUpdate,
    CatReload,
    CatAdopt,
    FolderNavigate,
    FolderChoose,
    PermissionRequest,
}

impl Endpoint {
    #[cfg(test)]
    pub const ALL: [Endpoint; 13] = [
        Endpoint::Homepage,
        Endpoint::DriveHomepage,
        Endpoint::DriveItemsSelected,
        Endpoint::DocsHomepage,
        Endpoint::DocsFileScopeGranted,
        Endpoint::EditorsHomepage,
        Endpoint::CatSelect,
        Endpoint::CatUpdate,
        Endpoint::CatReload,
        Endpoint::CatAdopt,
        Endpoint::FolderNavigate,
        Endpoint::FolderChoose,
        Endpoint::PermissionRequest,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Homepage => "/homepage",
            Endpoint::DriveHomepage => "/drive/homepage",
            Endpoint::DriveItemsSelected => "/drive/items-selected",
            Endpoint::DocsHomepage => "/docs/homepage",
            Endpoint::DocsFileScopeGranted => "/docs/file-scope-granted",
            Endpoint::EditorsHomepage => "/editors/homepage",
            Endpoint::CatSelect => "/cat/select",
            Endpoint::CatUpdate => "/cat/update",
            Endpoint::CatReload => "/cat/reload",
            Endpoint::CatAdopt => "/cat/adopt",
            Endpoint::FolderNavigate => "/folder/navigate",
            Endpoint::FolderChoose => "/folder/choose",
            Endpoint::PermissionRequest => "/permission/request",
        }
    }
}

/// Per-request inputs every card builder may need.
#[derive(Debug, Clone)]
pub struct CardContext {
    /// Public base URL of this server, used for action functions.
    pub public_url: String,
    pub icon_base_url: String,
    pub cataas_base_url: String,
    /// Cache-buster for direct image links.
    pub now_ms: i64,
}

impl CardContext {
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.public_url.trim_end_matches('/'), endpoint.path())
    }

    /// An action without parameters.
    pub fn action(&self, endpoint: Endpoint) -> Action {
        Action::new(self.url(endpoint))
    }

    /// An action carrying a versioned parameter bag.
    pub fn action_with<P: ActionParams>(&self, endpoint: Endpoint, params: &P) -> Action {
        self.action(endpoint)
            .parameters(ParamBag::encode(params).into_parameters())
    }

    /// Header icon, e.g. `icon` -> `<base>/icon_48.png`.
    pub fn icon_url(&self, name: &str) -> String {
        format!("{}/{}_48.png", self.icon_base_url.trim_end_matches('/'), name)
    }
}

#[cfg(test)]
pub(crate) fn test_context() -> CardContext {
    CardContext {
        public_url: "https://addon.example/".to_string(),
        icon_base_url: "https://icons.example/images".to_string(),
        cataas_base_url: "https://cataas.com".to_string(),
        now_ms: 1_700_000_000_000,
    }
}
