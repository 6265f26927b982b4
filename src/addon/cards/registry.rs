// Cards that can be re-rendered from a reload action.
//
// A reload button carries the card kind as a string; the registry maps it back
// to a builder. Only kinds registered at startup can be rebuilt.

use std::collections::HashMap;
use std::str::FromStr;

use super::card_model::Card;
use super::cat_cards::{cat_card, editor_permission_card};
use crate::addon::endpoints::CardContext;
use crate::addon::error::AddonError;
use crate::addon::params::ReloadParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Cat,
    EditorPermission,
}

impl CardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CardKind::Cat => "cat",
            CardKind::EditorPermission => "editor_permission",
        }
    }
}

impl FromStr for CardKind {
    type Err = AddonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cat" => Ok(CardKind::Cat),
            "editor_permission" => Ok(CardKind::EditorPermission),
            other => Err(AddonError::UnknownCard(other.to_string())),
        }
    }
}

pub type CardBuilder = fn(&CardContext, &ReloadParams) -> Card;

pub struct CardRegistry {
    builders: HashMap<CardKind, CardBuilder>,
}

impl CardRegistry {
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registry with every card this add-on can reload.
    pub fn standard() -> Self {
        Self::empty()
            .register(CardKind::Cat, cat_card)
            .register(CardKind::EditorPermission, editor_permission_card)
    }

    pub fn register(mut self, kind: CardKind, builder: CardBuilder) -> Self {
        self.builders.insert(kind, builder);
        self
    }

    pub fn build(&self, ctx: &CardContext, params: &ReloadParams) -> Result<Card, AddonError> {
        let builder = self
            .builders
            .get(&params.kind)
            .ok_or_else(|| AddonError::UnknownCard(params.kind.as_str().to_string()))?;
        Ok(builder(ctx, params))
    }
}
