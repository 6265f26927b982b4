// Turns the (untrusted) form values of the cat selection card into a validated
// image API request. Everything here is pure so it can be tested without HTTP.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::core::captions::sanitize;

pub const MIN_IMAGE_SIZE: i64 = 32;
pub const MAX_IMAGE_SIZE: i64 = 1024;
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

pub const MIN_FONT_SIZE: i64 = 10;
pub const MAX_FONT_SIZE: i64 = 100;
pub const DEFAULT_FONT_SIZE: u32 = 30;

pub const DEFAULT_FONT_COLOR: &str = "#fff";
pub const DEFAULT_FONT_BACKGROUND: &str = "#000";

/// Fonts the image API knows. The first one is the fallback.
pub const VALID_FONTS: [&str; 10] = [
    "Comic Sans MS",
    "Andale Mono",
    "Impact",
    "Arial",
    "Arial Black",
    "Courier New",
    "Georgia",
    "Times New Roman",
    "Verdana",
    "Webdings",
];

/// Rendering flags that never change.
const FIXED_QUERY: [(&str, &str); 2] = [("fit", "contain"), ("position", "center")];

/// Same set `encodeURIComponent`-style encoders leave alone, minus `!*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a value for use as a single URL path segment or query value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Raw options as they arrive from the card (form inputs and action parameters).
#[derive(Debug, Clone, Default)]
pub struct CatOptions {
    pub id: Option<String>,
    pub tags: Vec<String>,
    pub message: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<String>,
    pub font_color: Option<String>,
    pub font_background: Option<String>,
}

/// A validated request for the image API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatImageRequest {
    /// A fixed image id; when present, tags are ignored.
    pub id: Option<String>,
    pub tags: Vec<String>,
    /// Sanitized caption, not encoded.
    pub caption: String,
    pub width: u32,
    pub height: u32,
    pub font: &'static str,
    pub font_size: u32,
    pub font_color: String,
    pub font_background: String,
}

/// Builds a validated request from raw options, falling back to defaults for
/// anything missing or out of range.
pub fn build_image_request(options: &CatOptions) -> CatImageRequest {
    let id = options
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let tags = if id.is_some() {
        Vec::new()
    } else {
        options
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    };

    CatImageRequest {
        id,
        tags,
        caption: sanitize(options.message.as_deref()),
        width: parse_in_range(options.width.as_deref(), MIN_IMAGE_SIZE, MAX_IMAGE_SIZE)
            .unwrap_or(DEFAULT_WIDTH),
        height: parse_in_range(options.height.as_deref(), MIN_IMAGE_SIZE, MAX_IMAGE_SIZE)
            .unwrap_or(DEFAULT_HEIGHT),
        font: validate_font(options.font.as_deref()),
        font_size: parse_in_range(options.font_size.as_deref(), MIN_FONT_SIZE, MAX_FONT_SIZE)
            .unwrap_or(DEFAULT_FONT_SIZE),
        font_color: validate_color(options.font_color.as_deref(), DEFAULT_FONT_COLOR),
        font_background: validate_color(
            options.font_background.as_deref(),
            DEFAULT_FONT_BACKGROUND,
        ),
    }
}

/// Parses an integer and accepts it only inside `[min, max]`.
pub fn parse_in_range(value: Option<&str>, min: i64, max: i64) -> Option<u32> {
    let parsed: i64 = value?.trim().parse().ok()?;
    if (min..=max).contains(&parsed) {
        u32::try_from(parsed).ok()
    } else {
        None
    }
}

/// Returns the matching allow-listed font, or the default one.
pub fn validate_font(value: Option<&str>) -> &'static str {
    value
        .and_then(|font| VALID_FONTS.iter().find(|valid| **valid == font))
        .copied()
        .unwrap_or(VALID_FONTS[0])
}

/// Accepts `#rgb` and `#rrggbb` hex colors.
pub fn validate_color(value: Option<&str>, default: &str) -> String {
    let valid = value.map(str::trim).filter(|v| {
        v.strip_prefix('#').is_some_and(|hex| {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        })
    });

    valid.unwrap_or(default).to_lowercase()
}

impl CatImageRequest {
    /// Path below the API base, e.g. `/cat/cute,orange/says/Hola`.
    pub fn path(&self) -> String {
        let mut segments: Vec<String> = Vec::new();

        if let Some(id) = &self.id {
            segments.push(encode_component(id));
        } else if !self.tags.is_empty() {
            segments.push(encode_component(&self.tags.join(",")));
        }

        if !self.caption.is_empty() {
            segments.push("says".to_string());
            segments.push(encode_component(&self.caption));
        }

        let mut path = String::from("/cat");
        for segment in segments {
            path.push('/');
            path.push_str(&segment);
        }
        path
    }

    /// Query string (without the leading `?`). Always asks for a JSON reply.
    pub fn query(&self) -> String {
        let mut pairs: Vec<(&str, String)> = FIXED_QUERY
            .iter()
            .map(|(k, v)| (*k, v.to_string()))
            .collect();

        pairs.push(("fontSize", self.font_size.to_string()));
        pairs.push(("fontColor", self.font_color.clone()));
        pairs.push(("fontBackground", self.font_background.clone()));
        pairs.push(("json", "true".to_string()));
        pairs.push(("height", self.height.to_string()));
        pairs.push(("width", self.width.to_string()));
        pairs.push(("font", self.font.to_string()));

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn to_url(&self, base_url: &str) -> String {
        format!(
            "{}{}?{}",
            base_url.trim_end_matches('/'),
            self.path(),
            self.query()
        )
    }
}

/// Direct image URL for a captioned random cat. The timestamp defeats host-side caching.
pub fn caption_image_url(base_url: &str, caption: &str, now_ms: i64) -> String {
    format!(
        "{}/cat/says/{}?time={}",
        base_url.trim_end_matches('/'),
        encode_component(&sanitize(Some(caption))),
        now_ms
    )
}
