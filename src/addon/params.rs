// Action parameter bags.
//
// Card actions can only carry flat string maps, so every callback's state is
// written into a versioned bag (`v=1`) and read back into a typed struct.
// Missing optional fields fall back to defaults; a missing required field is
// a `BadRequest`.

use std::collections::{BTreeMap, HashMap};

use super::cards::card_model::ActionParameter;
use super::cards::registry::CardKind;
use super::endpoints::Endpoint;
use super::error::AddonError;

pub const VERSION_KEY: &str = "v";
pub const CURRENT_VERSION: &str = "1";

/// A flat string map with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamBag(BTreeMap<String, String>);

impl ParamBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Skips `None` so absent values stay absent on the way back.
    pub fn set_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, value.to_string());
    }

    /// Empty strings read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn get_owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    pub fn require(&self, key: &str) -> Result<&str, AddonError> {
        self.get(key).ok_or_else(|| AddonError::missing(key))
    }

    pub fn encode<P: ActionParams>(params: &P) -> Self {
        let mut bag = Self::new();
        bag.set(VERSION_KEY, CURRENT_VERSION);
        params.write(&mut bag);
        bag
    }

    /// Reads a typed bag. A bag without `v` is read as the current version.
    pub fn decode<P: ActionParams>(&self) -> Result<P, AddonError> {
        match self.get(VERSION_KEY) {
            None | Some(CURRENT_VERSION) => P::read(self),
            Some(other) => Err(AddonError::BadRequest(format!(
                "unsupported parameter version `{}`",
                other
            ))),
        }
    }

    pub fn into_parameters(self) -> Vec<ActionParameter> {
        self.0
            .into_iter()
            .map(|(key, value)| ActionParameter { key, value })
            .collect()
    }
}

/// A struct that round-trips through a `ParamBag`.
pub trait ActionParams: Sized {
    fn write(&self, bag: &mut ParamBag);

    fn read(bag: &ParamBag) -> Result<Self, AddonError>;
}

/// Where an adopted cat ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertTarget {
    /// Saved as an image file in a Drive folder.
    #[default]
    Drive,
    /// Appended to the open Google Doc.
    Docs,
}

impl InsertTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            InsertTarget::Drive => "drive",
            InsertTarget::Docs => "docs",
        }
    }

    fn parse(value: Option<&str>) -> Result<Self, AddonError> {
        match value {
            None | Some("drive") => Ok(InsertTarget::Drive),
            Some("docs") => Ok(InsertTarget::Docs),
            Some(other) => Err(AddonError::BadRequest(format!(
                "unknown insert target `{}`",
                other
            ))),
        }
    }
}

/// State carried by the cat selection card's buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatCardParams {
    pub target: InsertTarget,
    /// Only for the Docs target.
    pub document_id: Option<String>,
    /// Image id of the cat on screen.
    pub id: Option<String>,
    /// Direct URL of the cat on screen.
    pub url: Option<String>,
    pub name: Option<String>,
}

impl CatCardParams {
    pub fn for_target(target: InsertTarget, document_id: Option<String>) -> Self {
        Self {
            target,
            document_id,
            ..Self::default()
        }
    }
}

impl ActionParams for CatCardParams {
    fn write(&self, bag: &mut ParamBag) {
        bag.set("target", self.target.as_str());
        bag.set_opt("documentId", self.document_id.as_deref());
        bag.set_opt("id", self.id.as_deref());
        bag.set_opt("url", self.url.as_deref());
        bag.set_opt("name", self.name.as_deref());
    }

    fn read(bag: &ParamBag) -> Result<Self, AddonError> {
        Ok(Self {
            target: InsertTarget::parse(bag.get("target"))?,
            document_id: bag.get_owned("documentId"),
            id: bag.get_owned("id"),
            url: bag.get_owned("url"),
            name: bag.get_owned("name"),
        })
    }
}

/// What the folder browser's final button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderCallback {
    /// Save the carried cat image into the chosen folder.
    #[default]
    SaveCat,
}

impl FolderCallback {
    pub fn as_str(self) -> &'static str {
        match self {
            FolderCallback::SaveCat => "save_cat",
        }
    }

    pub fn endpoint(self) -> Endpoint {
        match self {
            FolderCallback::SaveCat => Endpoint::FolderChoose,
        }
    }

    fn parse(value: Option<&str>) -> Result<Self, AddonError> {
        match value {
            None | Some("save_cat") => Ok(FolderCallback::SaveCat),
            Some(other) => Err(AddonError::BadRequest(format!(
                "unknown folder callback `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderParams {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    /// Crop the header image into a circle.
    pub border: bool,
}

impl Default for HeaderParams {
    fn default() -> Self {
        Self {
            title: "Elige una carpeta".to_string(),
            subtitle: String::new(),
            image_url: String::new(),
            border: false,
        }
    }
}

/// State carried through every step of the folder browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderCardParams {
    /// Empty means "pick a drive first".
    pub item_id: String,
    pub reverse_order: bool,
    pub callback: FolderCallback,
    pub callback_text: String,
    pub header: HeaderParams,
    pub cat_url: Option<String>,
    pub cat_name: Option<String>,
}

impl Default for FolderCardParams {
    fn default() -> Self {
        Self {
            item_id: String::new(),
            reverse_order: false,
            callback: FolderCallback::default(),
            callback_text: "Guardar aquí".to_string(),
            header: HeaderParams::default(),
            cat_url: None,
            cat_name: None,
        }
    }
}

impl FolderCardParams {
    pub fn at(&self, item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            ..self.clone()
        }
    }

    pub fn with_order(&self, reverse_order: bool) -> Self {
        Self {
            reverse_order,
            ..self.clone()
        }
    }
}

impl ActionParams for FolderCardParams {
    fn write(&self, bag: &mut ParamBag) {
        bag.set("itemId", self.item_id.as_str());
        bag.set_bool("reverseOrder", self.reverse_order);
        bag.set("callback", self.callback.as_str());
        bag.set("callbackText", self.callback_text.as_str());
        bag.set("title", self.header.title.as_str());
        bag.set("subtitle", self.header.subtitle.as_str());
        bag.set("imageUrl", self.header.image_url.as_str());
        bag.set_bool("border", self.header.border);
        bag.set_opt("catUrl", self.cat_url.as_deref());
        bag.set_opt("catName", self.cat_name.as_deref());
    }

    fn read(bag: &ParamBag) -> Result<Self, AddonError> {
        let defaults = Self::default();

        Ok(Self {
            item_id: bag.get_or("itemId", ""),
            reverse_order: bag.get_bool("reverseOrder"),
            callback: FolderCallback::parse(bag.get("callback"))?,
            callback_text: bag.get_or("callbackText", &defaults.callback_text),
            header: HeaderParams {
                title: bag.get_or("title", &defaults.header.title),
                subtitle: bag.get_or("subtitle", ""),
                image_url: bag.get_or("imageUrl", ""),
                border: bag.get_bool("border"),
            },
            cat_url: bag.get_owned("catUrl"),
            cat_name: bag.get_owned("catName"),
        })
    }
}

/// Arguments for re-rendering a registered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadParams {
    pub kind: CardKind,
    pub caption: String,
    pub request_file_auth: bool,
    pub is_homepage: bool,
}

impl ReloadParams {
    pub fn new(kind: CardKind, caption: impl Into<String>) -> Self {
        Self {
            kind,
            caption: caption.into(),
            request_file_auth: false,
            is_homepage: false,
        }
    }
}

impl ActionParams for ReloadParams {
    fn write(&self, bag: &mut ParamBag) {
        bag.set("kind", self.kind.as_str());
        bag.set("caption", self.caption.as_str());
        bag.set_bool("requestFileAuth", self.request_file_auth);
        bag.set_bool("isHomepage", self.is_homepage);
    }

    fn read(bag: &ParamBag) -> Result<Self, AddonError> {
        let kind = bag.require("kind")?.parse()?;

        Ok(Self {
            kind,
            caption: bag.get_or("caption", ""),
            request_file_auth: bag.get_bool("requestFileAuth"),
            is_homepage: bag.get_bool("isHomepage"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(pairs: &[(&str, &str)]) -> ParamBag {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ParamBag::from_map(&map)
    }

    #[test]
    fn encode_stamps_version() {
        let params = ReloadParams::new(CardKind::Cat, "Hola");
        let encoded = ParamBag::encode(&params);
        assert_eq!(encoded.get(VERSION_KEY), Some("1"));
        assert_eq!(encoded.get("kind"), Some("cat"));

        let decoded: ReloadParams = encoded.decode().unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn other_versions_are_rejected() {
        let result = bag(&[("v", "2"), ("kind", "cat")]).decode::<ReloadParams>();
        assert!(matches!(result, Err(AddonError::BadRequest(_))));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let params: FolderCardParams = bag(&[("v", "1")]).decode().unwrap();
        assert_eq!(params, FolderCardParams::default());

        let params: CatCardParams = bag(&[]).decode().unwrap();
        assert_eq!(params.target, InsertTarget::Drive);
        assert_eq!(params.id, None);
    }

    #[test]
    fn reload_needs_a_known_kind() {
        let missing = bag(&[("v", "1")]).decode::<ReloadParams>();
        assert!(matches!(missing, Err(AddonError::BadRequest(_))));

        let unknown = bag(&[("v", "1"), ("kind", "dog")]).decode::<ReloadParams>();
        assert!(matches!(unknown, Err(AddonError::UnknownCard(_))));
    }

    #[test]
    fn folder_params_round_trip() {
        let params = FolderCardParams {
            item_id: "abc".to_string(),
            reverse_order: true,
            cat_url: Some("https://cataas.com/cat/xyz".to_string()),
            cat_name: Some("Michi".to_string()),
            header: HeaderParams {
                title: "Guardar gato".to_string(),
                subtitle: "¿Dónde?".to_string(),
                image_url: "https://icons/icon_48.png".to_string(),
                border: true,
            },
            ..FolderCardParams::default()
        };

        let decoded: FolderCardParams = ParamBag::encode(&params).decode().unwrap();
        assert_eq!(decoded, params);
        assert_eq!(decoded.at("def").item_id, "def");
        assert!(!decoded.with_order(false).reverse_order);
    }

    #[test]
    fn unknown_target_is_rejected() {
        let result = bag(&[("target", "slides")]).decode::<CatCardParams>();
        assert!(matches!(result, Err(AddonError::BadRequest(_))));
    }

    #[test]
    fn parameters_are_sorted_pairs() {
        let mut bag = ParamBag::new();
        bag.set("b", "2");
        bag.set("a", "1");
        let params = bag.into_parameters();
        assert_eq!(params[0].key, "a");
        assert_eq!(params[1].value, "2");
    }
}
