// Pieces shared by several cards.

use super::card_model::{
    Action, Button, CardHeader, DecoratedText, FixedFooter, Icon, ImageType, OnClick, OpenLink,
};
use crate::addon::endpoints::CardContext;
use crate::addon::params::HeaderParams;

pub const CATAAS_HOME: &str = "https://cataas.com";

/// Header with one of the add-on's cat icons.
pub fn cat_header(ctx: &CardContext, title: &str, subtitle: &str, icon: &str, circle: bool) -> CardHeader {
    let image_type = if circle {
        ImageType::Circle
    } else {
        ImageType::Square
    };

    CardHeader::new(title)
        .subtitle(subtitle)
        .image(ctx.icon_url(icon), image_type)
}

/// Header described by a folder browser's parameters.
pub fn header_from(params: &HeaderParams) -> CardHeader {
    let header = CardHeader::new(params.title.as_str()).subtitle(params.subtitle.as_str());
    if params.image_url.is_empty() {
        return header;
    }

    let image_type = if params.border {
        ImageType::Circle
    } else {
        ImageType::Square
    };
    header.image(params.image_url.as_str(), image_type)
}

pub fn peek_header(title: &str, subtitle: &str, image_url: &str) -> CardHeader {
    let header = CardHeader::new(title).subtitle(subtitle);
    if image_url.is_empty() {
        header
    } else {
        header.image(image_url, ImageType::Square)
    }
}

/// Footer linking to the image API.
pub fn cat_footer() -> FixedFooter {
    FixedFooter {
        primary_button: Button::new(
            "Maullando con cataas.com",
            OnClick::OpenLink(OpenLink {
                url: CATAAS_HOME.to_string(),
            }),
        ),
    }
}

pub fn filled_button(text: &str, action: Action) -> Button {
    Button::filled(text, OnClick::Action(action))
}

/// How many non-folder files a folder holds.
pub fn file_count(count: usize) -> DecoratedText {
    let (icon, text) = match count {
        0 => ("file_copy_off", "Carpeta <b>vacía</b>".to_string()),
        1 => ("file_copy", "Un único archivo dentro".to_string()),
        n => ("file_copy", format!("<b>{}</b> archivos extra", n)),
    };

    DecoratedText::new(text)
        .bottom_label("Contenido de la carpeta")
        .start_icon(Icon::material(icon))
}
