// Cat image logic: request building, the image API port, and tag sampling.

pub mod cat_request;
pub mod cat_service;
pub mod phrases;
pub mod tags;

pub use cat_request::{CatImageRequest, CatOptions};
pub use cat_service::{CatError, CatImage, CatImageApi, CatService, CataasReply};
pub use tags::TagChoices;
