use super::card_model::{
    ButtonList, Card, Image, InputType, Section, SelectionInput, SelectionItem, SelectionType,
    TextInput, Validation, Widget,
};
use super::widgets::{cat_footer, cat_header, filled_button};
use crate::addon::endpoints::{CardContext, Endpoint};
use crate::addon::params::{CatCardParams, ReloadParams};
use crate::core::captions::MAX_CAPTION_LENGTH;
use crate::core::cats::cat_request::{caption_image_url, DEFAULT_HEIGHT, DEFAULT_WIDTH, VALID_FONTS};
use crate::core::cats::TagChoices;

pub const DEFAULT_CAT_NAME: &str = "Gato";

/// Dropdown labels for the allow-listed fonts.
const FONT_OPTIONS: [(&str, &str); 10] = [
    ("🐵 Ándale", "Andale Mono"),
    ("💥 ¡Impacto!", "Impact"),
    ("💤 Arial", "Arial"),
    ("💤 Arial Negrillas", "Arial Black"),
    ("💬 Comic", "Comic Sans MS"),
    ("🤖 Courier", "Courier New"),
    ("🌹 Georgia", "Georgia"),
    ("🔱 Times", "Times New Roman"),
    ("🌺 Verdana", "Verdana"),
    ("💩 Sin sentido", "Webdings"),
];

/// Inputs the update buttons must send even when untouched.
const REQUIRED_INPUTS: [&str; 3] = ["width", "height", "font"];

/// A cat saying the reload caption, with a button for a fresh one.
pub fn cat_card(ctx: &CardContext, params: &ReloadParams) -> Card {
    let image_url = caption_image_url(&ctx.cataas_base_url, &params.caption, ctx.now_ms);

    let mut section = Section::new()
        .widget(Image::new(image_url, "Miau"))
        .widget(ButtonList {
            buttons: vec![
                filled_button("Nuevo gato", ctx.action_with(Endpoint::CatReload, params)),
                filled_button("Personalizar", ctx.action(Endpoint::CatSelect)),
            ],
        });

    if params.request_file_auth {
        section = section.widget(Widget::divider()).widget(filled_button(
            "Permiso para modificar",
            ctx.action(Endpoint::PermissionRequest),
        ));
    }

    let card = Card::new()
        .header(cat_header(ctx, "¡Aparece un gato!", "¿No es bonito?", "icon", true))
        .section(section)
        .footer(cat_footer());

    if params.is_homepage {
        return card;
    }

    card.peek_header(cat_header(ctx, "Gato con contexto", &params.caption, "naranja", false))
}

/// Asks for permission to edit the open file.
pub fn editor_permission_card(ctx: &CardContext, _params: &ReloadParams) -> Card {
    Card::new()
        .header(cat_header(ctx, "¡Aparece un gato!", "¿No es bonito?", "icon", true))
        .section(Section::new().widget(filled_button(
            "Pedir autorización",
            ctx.action(Endpoint::PermissionRequest),
        )))
        .footer(cat_footer())
}

/// Shown in Docs until the add-on may edit the document.
pub fn docs_permission_card(ctx: &CardContext) -> Card {
    Card::new().section(
        Section::new()
            .widget(Widget::paragraph("Da permiso para modificar el archivo"))
            .widget(filled_button(
                "Dar permiso",
                ctx.action(Endpoint::PermissionRequest),
            )),
    )
}

/// Everything the selection card shows.
#[derive(Debug, Clone)]
pub struct CatSelection {
    pub params: CatCardParams,
    pub name: String,
    pub message: String,
    pub width: String,
    pub height: String,
    pub font: String,
    pub tags: TagChoices,
}

impl CatSelection {
    pub fn new(params: CatCardParams, tags: TagChoices) -> Self {
        Self {
            name: params
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_CAT_NAME.to_string()),
            params,
            message: String::new(),
            width: DEFAULT_WIDTH.to_string(),
            height: DEFAULT_HEIGHT.to_string(),
            font: VALID_FONTS[0].to_string(),
            tags,
        }
    }
}

fn text_input(name: &str, label: &str, hint: &str, value: &str, validation: Validation) -> TextInput {
    TextInput {
        name: name.to_string(),
        label: label.to_string(),
        hint_text: Some(hint.to_string()),
        value: (!value.is_empty()).then(|| value.to_string()),
        validation: Some(validation),
    }
}

fn caption_validation() -> Validation {
    Validation {
        character_limit: MAX_CAPTION_LENGTH as u32,
        input_type: InputType::Text,
    }
}

fn size_validation() -> Validation {
    Validation {
        character_limit: 4,
        input_type: InputType::Integer,
    }
}

fn tag_input(tags: &TagChoices) -> SelectionInput {
    SelectionInput {
        name: "tags".to_string(),
        label: "Características".to_string(),
        selection_type: SelectionType::MultiSelect,
        items: tags
            .items
            .iter()
            .map(|tag| SelectionItem {
                text: tag.label.clone(),
                value: tag.value.clone(),
                selected: tag.selected,
                bottom_text: Some(tag.phrase.clone()),
            })
            .collect(),
        multi_select_max_selected_items: Some(tags.max_selected),
        multi_select_min_query_length: Some(tags.min_query_length),
    }
}

fn font_input(selected: &str) -> SelectionInput {
    SelectionInput {
        name: "font".to_string(),
        label: "Tipo de letra".to_string(),
        selection_type: SelectionType::Dropdown,
        items: FONT_OPTIONS
            .iter()
            .map(|(label, value)| SelectionItem {
                text: label.to_string(),
                value: value.to_string(),
                selected: *value == selected,
                bottom_text: None,
            })
            .collect(),
        multi_select_max_selected_items: None,
        multi_select_min_query_length: None,
    }
}

/// Form to choose tags, caption, size and font, plus the fetched cat if any.
pub fn cat_selection_card(ctx: &CardContext, selection: &CatSelection) -> Card {
    let params = &selection.params;

    let options = Section::new()
        .header("Opciones")
        .collapsible(3)
        .widget(text_input(
            "name",
            "Nombre",
            "¿Cómo se llama?",
            &selection.name,
            caption_validation(),
        ))
        .widget(text_input(
            "message",
            "Mensaje",
            "¿Qué dice el gato?",
            &selection.message,
            caption_validation(),
        ))
        .widget(tag_input(&selection.tags))
        .widget(text_input(
            "width",
            "Ancho",
            "¿Qué tan gordo el gato?",
            &selection.width,
            size_validation(),
        ))
        .widget(text_input(
            "height",
            "Alto",
            "¿Qué tan alto el gato?",
            &selection.height,
            size_validation(),
        ))
        .widget(font_input(&selection.font));

    // A new cat drops the current id; changing the caption keeps it.
    let fresh = CatCardParams {
        id: None,
        url: None,
        ..params.clone()
    };
    let new_cat_text = if params.id.is_some() {
        "¡Nuevo 😺!"
    } else {
        "¡A ver el gato!"
    };

    let mut buttons = vec![filled_button(
        new_cat_text,
        ctx.action_with(Endpoint::CatUpdate, &fresh)
            .required_widgets(&REQUIRED_INPUTS),
    )];
    if params.id.is_some() {
        buttons.push(filled_button(
            "¡Cambiar 💬!",
            ctx.action_with(Endpoint::CatUpdate, params)
                .required_widgets(&REQUIRED_INPUTS),
        ));
    }

    let mut card = Card::new()
        .header(cat_header(ctx, "¿Te gustan los gatos?", "¡Son preciosos!", "icon", true))
        .peek_header(cat_header(ctx, "Selección de gato", "¡Imágenes!", "naranja", false))
        .footer(cat_footer())
        .section(options)
        .section(Section::new().widget(ButtonList { buttons }));

    if let Some(url) = &params.url {
        card = card.section(
            Section::new()
                .widget(Image::new(url.as_str(), "Miau"))
                .widget(filled_button(
                    "😻 ¡Adoptar gato! 😹",
                    ctx.action_with(Endpoint::CatAdopt, params),
                )),
        );
    }

    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::cards::card_model::{Button, OnClick};
    use crate::addon::cards::registry::CardKind;
    use crate::addon::endpoints::test_context;
    use crate::addon::params::InsertTarget;
    use crate::core::cats::tags::TagChoice;

    fn buttons(card: &Card) -> Vec<&Button> {
        card.sections
            .iter()
            .flat_map(|s| s.widgets.iter())
            .filter_map(|w| match w {
                Widget::ButtonList(list) => Some(list.buttons.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn action_url(button: &Button) -> &str {
        match &button.on_click {
            OnClick::Action(action) => &action.function,
            OnClick::OpenLink(link) => &link.url,
        }
    }

    fn tags() -> TagChoices {
        TagChoices {
            items: vec![TagChoice {
                value: "cute".to_string(),
                label: "Cute".to_string(),
                selected: true,
                phrase: "¡Yo! ¿Sí?".to_string(),
            }],
            max_selected: 5,
            min_query_length: 2,
        }
    }

    #[test]
    fn homepage_cat_card_has_no_peek_header() {
        let ctx = test_context();
        let mut params = ReloadParams::new(CardKind::Cat, "Buenos días, docs");
        params.is_homepage = true;

        let card = cat_card(&ctx, &params);
        assert!(card.peek_card_header.is_none());

        match &card.sections[0].widgets[0] {
            Widget::Image(image) => assert_eq!(
                image.image_url,
                "https://cataas.com/cat/says/Buenos%20d%C3%ADas%2C%20docs?time=1700000000000"
            ),
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn reload_button_carries_its_own_params() {
        let ctx = test_context();
        let params = ReloadParams::new(CardKind::Cat, "Hola");

        let card = cat_card(&ctx, &params);
        let reload = buttons(&card)[0];
        match &reload.on_click {
            OnClick::Action(action) => {
                assert_eq!(action.function, "https://addon.example/cat/reload");
                assert_eq!(action.param("kind"), Some("cat"));
                assert_eq!(action.param("caption"), Some("Hola"));
                assert_eq!(action.param("v"), Some("1"));
            }
            other => panic!("expected action, got {other:?}"),
        }
        assert_eq!(
            card.peek_card_header.map(|h| h.title),
            Some("Gato con contexto".to_string())
        );
    }

    #[test]
    fn file_auth_adds_permission_button() {
        let ctx = test_context();
        let mut params = ReloadParams::new(CardKind::Cat, "Hola");
        params.request_file_auth = true;

        let card = cat_card(&ctx, &params);
        let all = buttons(&card);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].text, "Permiso para modificar");
        assert_eq!(action_url(all[2]), "https://addon.example/permission/request");
    }

    #[test]
    fn selection_card_without_cat() {
        let ctx = test_context();
        let selection = CatSelection::new(CatCardParams::default(), tags());

        let card = cat_selection_card(&ctx, &selection);
        assert_eq!(card.sections.len(), 2);
        assert_eq!(card.sections[0].widgets.len(), 6);

        let all = buttons(&card);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "¡A ver el gato!");
    }

    #[test]
    fn selection_card_with_cat_can_adopt() {
        let ctx = test_context();
        let params = CatCardParams {
            target: InsertTarget::Docs,
            document_id: Some("doc-1".to_string()),
            id: Some("abc".to_string()),
            url: Some("https://cataas.com/cat/abc".to_string()),
            name: Some("Michi".to_string()),
        };
        let selection = CatSelection::new(params, tags());
        assert_eq!(selection.name, "Michi");

        let card = cat_selection_card(&ctx, &selection);
        assert_eq!(card.sections.len(), 3);

        let all = buttons(&card);
        let texts: Vec<_> = all.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["¡Nuevo 😺!", "¡Cambiar 💬!", "😻 ¡Adoptar gato! 😹"]);

        match (&all[0].on_click, &all[1].on_click, &all[2].on_click) {
            (OnClick::Action(fresh), OnClick::Action(change), OnClick::Action(adopt)) => {
                assert_eq!(fresh.param("id"), None);
                assert_eq!(fresh.param("documentId"), Some("doc-1"));
                assert_eq!(fresh.required_widgets, vec!["width", "height", "font"]);
                assert_eq!(change.param("id"), Some("abc"));
                assert_eq!(adopt.function, "https://addon.example/cat/adopt");
                assert_eq!(adopt.param("url"), Some("https://cataas.com/cat/abc"));
                assert_eq!(adopt.param("target"), Some("docs"));
            }
            other => panic!("unexpected clicks {other:?}"),
        }
    }

    #[test]
    fn font_dropdown_marks_selection() {
        let input = font_input("Impact");
        let selected: Vec<_> = input.items.iter().filter(|i| i.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "Impact");
        assert_eq!(input.items.len(), VALID_FONTS.len());
    }
}
