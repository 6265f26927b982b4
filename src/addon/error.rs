// Request-level errors and how each one reaches the user.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use super::cards::card_model::AddonResponse;
use crate::core::access::AuthError;
use crate::core::cats::CatError;
use crate::core::documents::DocsError;
use crate::core::folders::DriveError;

pub const NO_SUCH_CAT_TEXT: &str =
    "😿 No existe un gato con esas características 🙀 ¿Por qué no quitas algunas? 😸";
pub const CAT_FAILED_TEXT: &str = "😾 El gato no quiso venir 😿";
pub const DRIVE_FAILED_TEXT: &str = "🙀 Google Drive no respondió, intenta de nuevo";
pub const DOCS_FAILED_TEXT: &str = "🙀 No se pudo insertar el gato en el documento";
pub const AUTH_FAILED_TEXT: &str = "🔒 Falta autorización para usar Google Workspace";

#[derive(Debug, Error)]
pub enum AddonError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unknown card kind: {0}")]
    UnknownCard(String),
    #[error(transparent)]
    Cat(#[from] CatError),
    #[error(transparent)]
    Drive(#[from] DriveError),
    #[error(transparent)]
    Docs(#[from] DocsError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl AddonError {
    pub fn missing(param: &str) -> Self {
        AddonError::BadRequest(format!("missing parameter `{}`", param))
    }

    /// Notification shown in place of the failed action.
    pub fn notification_text(&self) -> Option<&'static str> {
        match self {
            AddonError::BadRequest(_) | AddonError::UnknownCard(_) => None,
            AddonError::Cat(CatError::NoSuchCat) => Some(NO_SUCH_CAT_TEXT),
            AddonError::Cat(CatError::Api(_)) => Some(CAT_FAILED_TEXT),
            AddonError::Drive(_) => Some(DRIVE_FAILED_TEXT),
            AddonError::Docs(_) => Some(DOCS_FAILED_TEXT),
            AddonError::Auth(_) => Some(AUTH_FAILED_TEXT),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AddonError {
    fn into_response(self) -> Response {
        let code = match &self {
            AddonError::BadRequest(_) => "BAD_REQUEST",
            AddonError::UnknownCard(_) => "UNKNOWN_CARD",
            AddonError::Cat(CatError::NoSuchCat) => {
                tracing::info!("No cat matches the requested tags");
                return AddonResponse::notify(NO_SUCH_CAT_TEXT).into_response();
            }
            other => {
                tracing::error!(error = %other, "Add-on action failed");
                let text = other.notification_text().unwrap_or(CAT_FAILED_TEXT);
                return AddonResponse::notify(text).into_response();
            }
        };

        tracing::warn!(error = %self, "Rejected add-on request");
        let body = ErrorBody {
            error: code,
            message: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_requests_answer_400() {
        let response = AddonError::missing("itemId").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AddonError::UnknownCard("dog".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_become_notifications() {
        let response = AddonError::from(CatError::NoSuchCat).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = AddonError::from(DriveError::Api("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn notification_texts() {
        assert_eq!(
            AddonError::from(CatError::NoSuchCat).notification_text(),
            Some(NO_SUCH_CAT_TEXT)
        );
        assert_eq!(
            AddonError::from(CatError::Api("x".to_string())).notification_text(),
            Some(CAT_FAILED_TEXT)
        );
        assert_eq!(
            AddonError::from(AuthError::MissingCredentials).notification_text(),
            Some(AUTH_FAILED_TEXT)
        );
        assert_eq!(AddonError::missing("v").notification_text(), None);
    }
}
