// The add-on event object posted to every endpoint.

use serde::Deserialize;
use std::collections::HashMap;

use super::params::ParamBag;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonEvent {
    #[serde(default)]
    pub common_event_object: CommonEvent,
    #[serde(default)]
    pub authorization_event_object: Option<AuthorizationEvent>,
    #[serde(default)]
    pub drive: Option<DriveEvent>,
    #[serde(default)]
    pub docs: Option<DocsEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonEvent {
    /// `DRIVE`, `DOCS`, `SHEETS`, ...
    pub host_app: Option<String>,
    #[serde(default)]
    pub form_inputs: HashMap<String, FormInput>,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    pub time_zone: Option<TimeZone>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub string_inputs: Option<StringInputs>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StringInputs {
    #[serde(default)]
    pub value: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeZone {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationEvent {
    #[serde(rename = "userOAuthToken")]
    pub user_oauth_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveEvent {
    #[serde(default)]
    pub selected_items: Vec<DriveSelectedItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveSelectedItem {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsEvent {
    pub id: Option<String>,
    #[serde(default)]
    pub addon_has_file_scope_permission: bool,
}

impl AddonEvent {
    /// Host app in lowercase, `"workspace"` when the event doesn't say.
    pub fn host_app(&self) -> String {
        self.common_event_object
            .host_app
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or("workspace")
            .to_lowercase()
    }

    pub fn time_zone_id(&self) -> Option<&str> {
        self.common_event_object
            .time_zone
            .as_ref()
            .map(|tz| tz.id.as_str())
    }

    pub fn user_token(&self) -> Option<&str> {
        self.authorization_event_object
            .as_ref()
            .and_then(|auth| auth.user_oauth_token.as_deref())
    }

    pub fn params(&self) -> ParamBag {
        ParamBag::from_map(&self.common_event_object.parameters)
    }

    /// All values of a form input.
    pub fn form_values(&self, name: &str) -> Vec<String> {
        self.common_event_object
            .form_inputs
            .get(name)
            .and_then(|input| input.string_inputs.as_ref())
            .map(|inputs| inputs.value.clone())
            .unwrap_or_default()
    }

    /// First value of a text input or dropdown.
    pub fn form_value(&self, name: &str) -> Option<String> {
        self.form_values(name).into_iter().next()
    }

    pub fn selected_titles(&self) -> Vec<&str> {
        self.drive
            .as_ref()
            .map(|drive| drive.selected_items.iter().map(|i| i.title.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn has_file_scope(&self) -> bool {
        self.docs
            .as_ref()
            .map(|docs| docs.addon_has_file_scope_permission)
            .unwrap_or(false)
    }

    pub fn document_id(&self) -> Option<&str> {
        self.docs.as_ref().and_then(|docs| docs.id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCS_EVENT: &str = r#"{
        "commonEventObject": {
            "hostApp": "DOCS",
            "platform": "WEB",
            "timeZone": {"id": "America/Mexico_City", "offset": -21600000},
            "parameters": {"v": "1", "target": "docs"},
            "formInputs": {
                "message": {"stringInputs": {"value": ["Hola"]}},
                "tags": {"stringInputs": {"value": ["cute", "orange"]}}
            }
        },
        "authorizationEventObject": {
            "userOAuthToken": "ya29.token",
            "systemIdToken": "eyJ..."
        },
        "docs": {"id": "doc-1", "title": "Notas", "addonHasFileScopePermission": true}
    }"#;

    #[test]
    fn parses_docs_event() {
        let event: AddonEvent = serde_json::from_str(DOCS_EVENT).unwrap();

        assert_eq!(event.host_app(), "docs");
        assert_eq!(event.time_zone_id(), Some("America/Mexico_City"));
        assert_eq!(event.user_token(), Some("ya29.token"));
        assert_eq!(event.form_value("message").as_deref(), Some("Hola"));
        assert_eq!(event.form_values("tags"), vec!["cute", "orange"]);
        assert_eq!(event.params().get("target"), Some("docs"));
        assert!(event.has_file_scope());
        assert_eq!(event.document_id(), Some("doc-1"));
    }

    #[test]
    fn empty_event_has_safe_defaults() {
        let event: AddonEvent = serde_json::from_str("{}").unwrap();

        assert_eq!(event.host_app(), "workspace");
        assert_eq!(event.time_zone_id(), None);
        assert_eq!(event.user_token(), None);
        assert!(event.form_values("tags").is_empty());
        assert!(event.selected_titles().is_empty());
        assert!(!event.has_file_scope());
    }

    #[test]
    fn parses_drive_selection() {
        let event: AddonEvent = serde_json::from_str(
            r#"{"drive": {"selectedItems": [
                {"id": "1", "title": "Gatos.png", "mimeType": "image/png"},
                {"id": "2", "title": "Notas"}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(event.selected_titles(), vec!["Gatos.png", "Notas"]);
    }
}
