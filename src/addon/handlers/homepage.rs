// Trigger endpoints: the host calls these when the sidebar opens or the
// Drive selection changes.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::addon::cards::cat_cards::{cat_selection_card, docs_permission_card, CatSelection};
use crate::addon::cards::{AddonResponse, Card, CardKind};
use crate::addon::error::AddonError;
use crate::addon::event::AddonEvent;
use crate::addon::params::{CatCardParams, InsertTarget, ReloadParams};
use crate::addon::state::AppState;
use crate::core::captions::sanitize;
use crate::core::greeting::homepage_caption;

/// Most selected titles the contextual caption shows.
const MAX_SELECTED_TITLES: usize = 5;

/// Hosts whose open file the add-on may ask to edit.
const FILE_SCOPED_HOSTS: [&str; 2] = ["docs", "sheets"];

/// POST /homepage
pub async fn homepage(
    State(state): State<AppState>,
    Json(event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let host_app = event.host_app();
    let caption = homepage_caption(&host_app, event.time_zone_id(), Utc::now());

    let mut params = ReloadParams::new(CardKind::Cat, caption);
    params.request_file_auth = FILE_SCOPED_HOSTS.contains(&host_app.as_str());
    params.is_homepage = true;

    tracing::info!(host_app = %host_app, "Rendering homepage");
    let card = state.cards.build(&state.card_context(), &params)?;
    Ok(AddonResponse::trigger(card))
}

/// POST /drive/homepage
pub async fn drive_homepage(
    State(state): State<AppState>,
    Json(_event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let card = selection_card(&state, CatCardParams::for_target(InsertTarget::Drive, None)).await;
    Ok(AddonResponse::trigger(card))
}

/// POST /drive/items-selected
pub async fn drive_items_selected(
    State(state): State<AppState>,
    Json(event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let caption = selection_caption(&event.selected_titles());
    tracing::debug!(caption = %caption, "Drive items selected");

    let card = state
        .cards
        .build(&state.card_context(), &ReloadParams::new(CardKind::Cat, caption))?;
    Ok(AddonResponse::trigger(card))
}

/// POST /docs/homepage and /docs/file-scope-granted
pub async fn docs_homepage(
    State(state): State<AppState>,
    Json(event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let ctx = state.card_context();
    if !event.has_file_scope() {
        return Ok(AddonResponse::trigger(docs_permission_card(&ctx)));
    }

    let params = CatCardParams::for_target(
        InsertTarget::Docs,
        event.document_id().map(str::to_string),
    );
    Ok(AddonResponse::trigger(selection_card(&state, params).await))
}

/// POST /editors/homepage
pub async fn editors_homepage(
    State(state): State<AppState>,
    Json(_event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let card = state.cards.build(
        &state.card_context(),
        &ReloadParams::new(CardKind::EditorPermission, ""),
    )?;
    Ok(AddonResponse::trigger(card))
}

/// Sanitized titles, one per line.
pub fn selection_caption(titles: &[&str]) -> String {
    titles
        .iter()
        .take(MAX_SELECTED_TITLES)
        .map(|title| sanitize(Some(title)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fresh selection card, before any cat was fetched.
pub(crate) async fn selection_card(
    state: &AppState,
    params: CatCardParams,
) -> Card {
    let tags = state.cats.tag_choices(&[]).await;
    cat_selection_card(&state.card_context(), &CatSelection::new(params, tags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::cards::card_model::Widget;
    use crate::addon::handlers::test_support::{event, harness};
    use serde_json::json;

    #[test]
    fn caption_keeps_five_titles() {
        let titles = ["a", "b", "c", "d", "e", "f"];
        assert_eq!(selection_caption(&titles), "a\nb\nc\nd\ne");
        assert_eq!(selection_caption(&[]), "");
    }

    #[tokio::test]
    async fn homepage_asks_for_file_auth_in_docs() {
        let h = harness();
        let docs = event(json!({
            "commonEventObject": {"hostApp": "DOCS", "timeZone": {"id": "UTC", "offset": 0}}
        }));

        let response = homepage(State(h.state.clone()), Json(docs)).await.unwrap();
        let card = response.card().unwrap();
        assert!(matches!(response, AddonResponse::Action(_)));
        assert!(card.peek_card_header.is_none());
        assert!(card.sections[0]
            .widgets
            .iter()
            .any(|w| matches!(w, Widget::Divider(_))));

        let drive = event(json!({"commonEventObject": {"hostApp": "DRIVE"}}));
        let response = homepage(State(h.state), Json(drive)).await.unwrap();
        let widgets = &response.card().unwrap().sections[0].widgets;
        assert_eq!(widgets.len(), 2);
    }

    #[tokio::test]
    async fn items_selected_captions_the_titles() {
        let h = harness();
        let selected = event(json!({
            "commonEventObject": {"hostApp": "DRIVE"},
            "drive": {"selectedItems": [{"title": "informe"}, {"title": "fotos"}]}
        }));

        let response = drive_items_selected(State(h.state), Json(selected))
            .await
            .unwrap();
        let card = response.card().unwrap();
        let peek = card.peek_card_header.as_ref().unwrap();
        assert_eq!(peek.subtitle.as_deref(), Some("informe\nfotos"));
    }

    #[tokio::test]
    async fn docs_without_file_scope_asks_for_it() {
        let h = harness();
        let docs = event(json!({
            "commonEventObject": {"hostApp": "DOCS"},
            "docs": {"id": "doc-1", "addonHasFileScopePermission": false}
        }));

        let response = docs_homepage(State(h.state), Json(docs)).await.unwrap();
        let card = response.card().unwrap();
        assert!(matches!(card.sections[0].widgets[0], Widget::TextParagraph(_)));
    }

    #[tokio::test]
    async fn docs_with_file_scope_targets_the_document() {
        let h = harness();
        let docs = event(json!({
            "commonEventObject": {"hostApp": "DOCS"},
            "docs": {"id": "doc-1", "addonHasFileScopePermission": true}
        }));

        let response = docs_homepage(State(h.state), Json(docs)).await.unwrap();
        let card = response.card().unwrap();
        let json = serde_json::to_string(card).unwrap();
        assert!(json.contains(r#"{"key":"documentId","value":"doc-1"}"#));
        assert!(json.contains(r#"{"key":"target","value":"docs"}"#));
    }

    #[tokio::test]
    async fn editors_homepage_offers_permission() {
        let h = harness();
        let response = editors_homepage(State(h.state), Json(AddonEvent::default()))
            .await
            .unwrap();
        let json = serde_json::to_string(response.card().unwrap()).unwrap();
        assert!(json.contains("https://addon.example/permission/request"));
    }
}
