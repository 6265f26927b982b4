// HTTP handlers, one file per group of endpoints.
// Each POST handler takes the add-on event and answers with card JSON.

pub mod cat;

pub mod folder;

pub mod health;

pub mod homepage;

pub mod permission;

#[cfg(test)]
pub(crate) mod test_support;
