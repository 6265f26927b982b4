use axum::Json;

use crate::addon::cards::AddonResponse;
use crate::addon::event::AddonEvent;

/// POST /permission/request
///
/// Opens the editor's consent dialog for the active file.
pub async fn request_file_scope(Json(event): Json<AddonEvent>) -> AddonResponse {
    tracing::info!(host_app = %event.host_app(), "Requesting file scope");
    AddonResponse::request_file_scope()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_with_editor_action() {
        let response = request_file_scope(Json(AddonEvent::default())).await;
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["renderActions"]["hostAppAction"]["editorAction"]
            ["requestFileScopeForActiveDocument"]
            .is_object());
    }
}
