// Google Workspace adapters.
// - `service_account.rs` signs JWT assertions and caches access tokens.
// - `drive_client.rs` and `docs_client.rs` implement the core ports over REST.
// - `connector.rs` picks the token for each request.

pub mod connector;
pub mod docs_client;
pub mod drive_client;
pub mod service_account;

pub use connector::GoogleConnector;
pub use service_account::ServiceAccountAuth;
