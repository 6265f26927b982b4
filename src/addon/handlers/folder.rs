// Folder browser callbacks.

use axum::extract::State;
use axum::Json;

use crate::addon::cards::cat_cards::DEFAULT_CAT_NAME;
use crate::addon::cards::folder_cards::folder_card;
use crate::addon::cards::AddonResponse;
use crate::addon::error::AddonError;
use crate::addon::event::AddonEvent;
use crate::addon::params::FolderCardParams;
use crate::addon::state::AppState;
use crate::core::folders::{FolderBrowser, NewFile};

/// POST /folder/navigate
pub async fn navigate(
    State(state): State<AppState>,
    Json(event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let params: FolderCardParams = event.params().decode()?;

    let drive = state.workspace.drive(event.user_token()).await?;
    let view = FolderBrowser::new(drive.as_ref())
        .open_item(Some(&params.item_id), params.reverse_order)
        .await?;

    Ok(AddonResponse::update(folder_card(
        &state.card_context(),
        &params,
        &view,
    )))
}

/// POST /folder/choose
///
/// Saves the carried cat image as `<name>.<ext>` in the chosen folder.
pub async fn choose_folder(
    State(state): State<AppState>,
    Json(event): Json<AddonEvent>,
) -> Result<AddonResponse, AddonError> {
    let params: FolderCardParams = event.params().decode()?;
    if params.item_id.trim().is_empty() {
        return Err(AddonError::missing("itemId"));
    }
    let cat_url = params
        .cat_url
        .as_deref()
        .ok_or_else(|| AddonError::missing("catUrl"))?;
    let name = params.cat_name.as_deref().unwrap_or(DEFAULT_CAT_NAME);

    let image = state.cats.download(cat_url).await?;
    let file = NewFile {
        name: format!("{}.{}", name, extension_for(&image.mime_type)),
        parent_id: params.item_id.clone(),
        mime_type: image.mime_type,
        bytes: image.bytes,
    };

    let drive = state.workspace.drive(event.user_token()).await?;
    let created = FolderBrowser::new(drive.as_ref()).save_file(file).await?;

    Ok(AddonResponse::notify(format!(
        "😻 {} se mudó a su nueva carpeta",
        created.name
    )))
}

/// File extension for an image MIME type.
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type.split(';').next().unwrap_or_default().trim() {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "jpg",
    }
}
