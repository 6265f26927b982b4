// The HTTP face of the add-on: event parsing, cards, handlers and routing.
// Everything Google-Workspace-shaped lives here; business logic stays in core.

#[path = "cards/card_catalog.rs"]
pub mod cards;

pub mod config;

pub mod endpoints;

pub mod error;

pub mod event;

#[path = "handlers/handler_catalog.rs"]
pub mod handlers;

pub mod params;

pub mod router;

pub mod state;
