// Callbacks of the cat cards.

use axum::extract::State;
use axum::Json;

use super::homepage::selection_card;
use crate::addon::cards::cat_cards::{cat_selection_card, CatSelection, DEFAULT_CAT_NAME};
use crate::addon::cards::folder_cards::folder_card;
use crate::addon::cards::AddonResponse;
use crate::addon::error::AddonError;
use crate::addon::event::AddonEvent;
use crate::addon::params::{
    CatCardParams, FolderCardParams, HeaderParams, InsertTarget, ReloadParams,
};
use crate::addon::state::AppState;
use crate::core::captions::sanitize;
use crate::core::cats::CatOptions;
use crate::core::documents::append_image;
use crate::core::folders::FolderBrowser;

/// POST /cat/select
pub async fn select_cat(
    State(state): State<AppState>,
    Json(event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let bag = event.params();
    let params = if bag.get("target").is_none() && event.host_app() == "docs" {
        CatCardParams::for_target(
            InsertTarget::Docs,
            event.document_id().map(str::to_string),
        )
    } else {
        bag.decode::<CatCardParams>()?
    };

    Ok(AddonResponse::push(selection_card(&state, params).await))
}

/// POST /cat/update
///
/// Fetches a cat for the form values and redraws the selection card with it.
/// A "new cat" button clears `id` so the tags decide; "change caption" keeps it.
pub async fn update_cat(
    State(state): State<AppState>,
    Json(event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let mut params: CatCardParams = event.params().decode()?;

    let options = CatOptions {
        id: params.id.clone(),
        tags: event.form_values("tags"),
        message: event.form_value("message"),
        width: event.form_value("width"),
        height: event.form_value("height"),
        font: event.form_value("font"),
        ..CatOptions::default()
    };

    let (request, reply) = state.cats.fetch_cat(&options).await?;
    let tags = state.cats.tag_choices(&reply.tags).await;

    let name = Some(sanitize(event.form_value("name").as_deref()))
        .filter(|n| !n.is_empty())
        .or_else(|| params.name.clone())
        .unwrap_or_else(|| DEFAULT_CAT_NAME.to_string());

    params.id = Some(reply.id);
    params.url = Some(reply.url);
    params.name = Some(name.clone());

    let selection = CatSelection {
        params,
        name,
        message: request.caption,
        width: request.width.to_string(),
        height: request.height.to_string(),
        font: request.font.to_string(),
        tags,
    };

    Ok(AddonResponse::update(cat_selection_card(
        &state.card_context(),
        &selection,
    )))
}

/// POST /cat/reload
pub async fn reload_card(
    State(state): State<AppState>,
    Json(event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let params: ReloadParams = event.params().decode()?;
    tracing::debug!(kind = params.kind.as_str(), "Reloading card");

    let card = state.cards.build(&state.card_context(), &params)?;
    Ok(AddonResponse::update(card))
}

/// POST /cat/adopt
///
/// Docs appends the cat to the open document. Drive starts the folder browser,
/// which ends in /folder/choose.
pub async fn adopt_cat(
    State(state): State<AppState>,
    Json(event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let params: CatCardParams = event.params().decode()?;
    let url = params.url.clone().ok_or_else(|| AddonError::missing("url"))?;
    let name = params
        .name
        .clone()
        .unwrap_or_else(|| DEFAULT_CAT_NAME.to_string());

    match params.target {
        InsertTarget::Docs => {
            let document_id = params
                .document_id
                .as_deref()
                .or_else(|| event.document_id())
                .ok_or_else(|| AddonError::missing("documentId"))?;

            let docs = state.workspace.docs(event.user_token()).await?;
            append_image(docs.as_ref(), document_id, &url).await?;

            Ok(AddonResponse::notify(format!(
                "😻 {} ya vive en tu documento",
                name
            )))
        }
        InsertTarget::Drive => {
            let ctx = state.card_context();
            let folder_params = FolderCardParams {
                header: HeaderParams {
                    title: "Elige una carpeta".to_string(),
                    subtitle: "¡Que le guste al gato!".to_string(),
                    image_url: ctx.icon_url("icon"),
                    border: true,
                },
                cat_url: Some(url),
                cat_name: Some(name),
                ..FolderCardParams::default()
            };

            let drive = state.workspace.drive(event.user_token()).await?;
            let view = FolderBrowser::new(drive.as_ref())
                .open_item(None, folder_params.reverse_order)
                .await?;

            Ok(AddonResponse::push(folder_card(&ctx, &folder_params, &view)))
        }
    }
}
