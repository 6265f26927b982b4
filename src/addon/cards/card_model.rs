// Workspace add-on card JSON.
//
// Only the parts of the card schema this add-on renders are modelled. Everything
// serializes in the camelCase shape the host expects; optional fields are
// omitted rather than sent as `null`.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    /// Shown when a contextual card is minimized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peek_card_header: Option<CardHeader>,
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_footer: Option<FixedFooter>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: CardHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn peek_header(mut self, header: CardHeader) -> Self {
        self.peek_card_header = Some(header);
        self
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn footer(mut self, footer: FixedFooter) -> Self {
        self.fixed_footer = Some(footer);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageType {
    Square,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHeader {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<ImageType>,
}

impl CardHeader {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            image_url: None,
            image_type: None,
        }
    }

    /// Empty subtitles are dropped.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        let subtitle = subtitle.into();
        self.subtitle = (!subtitle.is_empty()).then_some(subtitle);
        self
    }

    pub fn image(mut self, url: impl Into<String>, image_type: ImageType) -> Self {
        self.image_url = Some(url.into());
        self.image_type = Some(image_type);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub collapsible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncollapsible_widgets_count: Option<u32>,
    pub widgets: Vec<Widget>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn collapsible(mut self, uncollapsible_widgets: u32) -> Self {
        self.collapsible = true;
        self.uncollapsible_widgets_count = Some(uncollapsible_widgets);
        self
    }

    pub fn widget(mut self, widget: impl Into<Widget>) -> Self {
        self.widgets.push(widget.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
    Image(Image),
    ButtonList(ButtonList),
    TextInput(TextInput),
    SelectionInput(SelectionInput),
    DecoratedText(DecoratedText),
    Divider(Empty),
    TextParagraph(TextParagraph),
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Empty {}

impl Widget {
    pub fn divider() -> Self {
        Widget::Divider(Empty {})
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Widget::TextParagraph(TextParagraph { text: text.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl Image {
    pub fn new(url: impl Into<String>, alt_text: &str) -> Self {
        Self {
            image_url: url.into(),
            alt_text: (!alt_text.is_empty()).then(|| alt_text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextParagraph {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ButtonList {
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ButtonType {
    Filled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub text: String,
    pub on_click: OnClick,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub button_type: Option<ButtonType>,
}

impl Button {
    pub fn new(text: impl Into<String>, on_click: OnClick) -> Self {
        Self {
            text: text.into(),
            on_click,
            button_type: None,
        }
    }

    pub fn filled(text: impl Into<String>, on_click: OnClick) -> Self {
        Self {
            button_type: Some(ButtonType::Filled),
            ..Self::new(text, on_click)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OnClick {
    Action(Action),
    OpenLink(OpenLink),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenLink {
    pub url: String,
}

/// A callback into this server. `function` is the full endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub function: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_widgets: Vec<String>,
}

impl Action {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            parameters: Vec::new(),
            required_widgets: Vec::new(),
        }
    }

    pub fn parameters(mut self, parameters: Vec<ActionParameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn required_widgets(mut self, names: &[&str]) -> Self {
        self.required_widgets = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Value of a parameter, mostly useful when inspecting built cards.
    #[cfg(test)]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

impl From<Action> for OnClick {
    fn from(action: Action) -> Self {
        OnClick::Action(action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionParameter {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputType {
    Text,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub character_limit: u32,
    pub input_type: InputType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionType {
    Dropdown,
    MultiSelect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInput {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub selection_type: SelectionType,
    pub items: Vec<SelectionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_select_max_selected_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_select_min_query_length: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionItem {
    pub text: String,
    pub value: String,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialIcon {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub material_icon: MaterialIcon,
}

impl Icon {
    pub fn material(name: &str) -> Self {
        Self {
            material_icon: MaterialIcon {
                name: name.to_string(),
                grade: None,
            },
        }
    }

    pub fn graded(name: &str, grade: i32) -> Self {
        Self {
            material_icon: MaterialIcon {
                name: name.to_string(),
                grade: Some(grade),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedText {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_icon: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_icon: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_click: Option<OnClick>,
}

impl DecoratedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bottom_label: None,
            start_icon: None,
            end_icon: None,
            on_click: None,
        }
    }

    pub fn bottom_label(mut self, label: impl Into<String>) -> Self {
        self.bottom_label = Some(label.into());
        self
    }

    pub fn start_icon(mut self, icon: Icon) -> Self {
        self.start_icon = Some(icon);
        self
    }

    pub fn end_icon(mut self, icon: Icon) -> Self {
        self.end_icon = Some(icon);
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(OnClick::Action(action));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedFooter {
    pub primary_button: Button,
}

macro_rules! impl_into_widget {
    ($($ty:ident),*) => {
        $(impl From<$ty> for Widget {
            fn from(value: $ty) -> Self {
                Widget::$ty(value)
            }
        })*
    };
}

impl_into_widget!(Image, ButtonList, TextInput, SelectionInput, DecoratedText, TextParagraph);

impl From<Button> for Widget {
    fn from(button: Button) -> Self {
        Widget::ButtonList(ButtonList {
            buttons: vec![button],
        })
    }
}

// ===== Responses =====

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Navigation {
    PushCard(Card),
    UpdateCard(Card),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderAction {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub navigations: Vec<Navigation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorAction {
    pub request_file_scope_for_active_document: Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostAppAction {
    pub editor_action: EditorAction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderActions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RenderAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_app_action: Option<HostAppAction>,
}

/// Body returned by every POST endpoint.
///
/// Triggers (homepages, item selection) answer with a bare `action`; callbacks
/// from card actions answer with `renderActions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AddonResponse {
    Action(RenderAction),
    RenderActions(RenderActions),
}

impl AddonResponse {
    /// First card shown by a trigger.
    pub fn trigger(card: Card) -> Self {
        AddonResponse::Action(RenderAction {
            navigations: vec![Navigation::PushCard(card)],
            notification: None,
        })
    }

    pub fn push(card: Card) -> Self {
        Self::navigate(Navigation::PushCard(card))
    }

    pub fn update(card: Card) -> Self {
        Self::navigate(Navigation::UpdateCard(card))
    }

    pub fn notify(text: impl Into<String>) -> Self {
        AddonResponse::RenderActions(RenderActions {
            action: Some(RenderAction {
                navigations: Vec::new(),
                notification: Some(Notification { text: text.into() }),
            }),
            host_app_action: None,
        })
    }

    /// Asks the editor to show the file-scope consent dialog.
    pub fn request_file_scope() -> Self {
        AddonResponse::RenderActions(RenderActions {
            action: None,
            host_app_action: Some(HostAppAction::default()),
        })
    }

    fn navigate(navigation: Navigation) -> Self {
        AddonResponse::RenderActions(RenderActions {
            action: Some(RenderAction {
                navigations: vec![navigation],
                notification: None,
            }),
            host_app_action: None,
        })
    }

    /// The card this response navigates to, if any.
    #[cfg(test)]
    pub fn card(&self) -> Option<&Card> {
        let action = match self {
            AddonResponse::Action(action) => Some(action),
            AddonResponse::RenderActions(render) => render.action.as_ref(),
        }?;

        action.navigations.first().map(|nav| match nav {
            Navigation::PushCard(card) | Navigation::UpdateCard(card) => card,
        })
    }

    /// The notification text, if any.
    #[cfg(test)]
    pub fn notification(&self) -> Option<&str> {
        match self {
            AddonResponse::RenderActions(RenderActions {
                action: Some(action),
                ..
            }) => action.notification.as_ref().map(|n| n.text.as_str()),
            _ => None,
        }
    }
}

impl IntoResponse for AddonResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
