// The infra module contains implementations of core traits.
// Each external service gets its own submodule.

#[path = "cataas/mod.rs"]
pub mod cataas;

#[path = "google/mod.rs"]
pub mod google;
