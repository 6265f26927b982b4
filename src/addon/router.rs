// Route table. Every path comes from `Endpoint` so card actions and routes
// can't drift apart.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::endpoints::Endpoint;
use super::handlers::{cat, folder, health, homepage, permission};
use super::state::AppState;

/// Builds the router and threads `AppState` through every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(trigger_routes())
        .merge(cat_routes())
        .merge(folder_routes())
        .route(
            Endpoint::PermissionRequest.path(),
            post(permission::request_file_scope),
        )
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Homepages and item selection.
fn trigger_routes() -> Router<AppState> {
    Router::new()
        .route(Endpoint::Homepage.path(), post(homepage::homepage))
        .route(Endpoint::DriveHomepage.path(), post(homepage::drive_homepage))
        .route(
            Endpoint::DriveItemsSelected.path(),
            post(homepage::drive_items_selected),
        )
        .route(Endpoint::DocsHomepage.path(), post(homepage::docs_homepage))
        .route(
            Endpoint::DocsFileScopeGranted.path(),
            post(homepage::docs_homepage),
        )
        .route(Endpoint::EditorsHomepage.path(), post(homepage::editors_homepage))
}

fn cat_routes() -> Router<AppState> {
    Router::new()
        .route(Endpoint::CatSelect.path(), post(cat::select_cat))
        .route(Endpoint::CatUpdate.path(), post(cat::update_cat))
        .route(Endpoint::CatReload.path(), post(cat::reload_card))
        .route(Endpoint::CatAdopt.path(), post(cat::adopt_cat))
}

fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(Endpoint::FolderNavigate.path(), post(folder::navigate))
        .route(Endpoint::FolderChoose.path(), post(folder::choose_folder))
}
