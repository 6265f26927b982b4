// Image API adapter.

pub mod cataas_client;

pub use cataas_client::CataasClient;
