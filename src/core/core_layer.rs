// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "access/workspace_access.rs"]
pub mod access;

#[path = "captions/caption_service.rs"]
pub mod captions;

#[path = "cats/mod.rs"]
pub mod cats;

#[path = "documents/document_service.rs"]
pub mod documents;

#[path = "folders/mod.rs"]
pub mod folders;

#[path = "greeting/greeting_service.rs"]
pub mod greeting;
