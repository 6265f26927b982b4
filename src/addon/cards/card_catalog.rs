// Cards module.
// `card_model` is the JSON schema; the other files build concrete cards.

pub mod card_model;

pub mod cat_cards;

pub mod folder_cards;

pub mod registry;

pub mod widgets;

pub use card_model::{AddonResponse, Card};
pub use registry::{CardKind, CardRegistry};
