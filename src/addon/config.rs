// Environment configuration. `main` loads `.env` first, so everything here can
// also come from that file.

use anyhow::Context;
use std::net::SocketAddr;

use crate::infra::cataas::cataas_client::DEFAULT_BASE_URL;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ICON_BASE_URL: &str =
    "https://media.githubusercontent.com/media/YamanquiChacala/Cats/refs/heads/main/images";
pub const DEFAULT_TAG_SAMPLE_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct AddonConfig {
    pub bind_addr: SocketAddr,
    /// Base URL the host calls back on; every action function starts with it.
    pub public_url: String,
    pub cataas_base_url: String,
    pub icon_base_url: String,
    pub tag_sample_size: usize,
}

impl AddonConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = get("ADDON_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("ADDON_BIND_ADDR must be a socket address like 0.0.0.0:8080")?;

        let public_url = get("ADDON_PUBLIC_URL").context(
            "Expected ADDON_PUBLIC_URL in the environment (the https URL the add-on is served at)",
        )?;
        if !public_url.starts_with("https://") && !public_url.starts_with("http://") {
            anyhow::bail!("ADDON_PUBLIC_URL must be an absolute URL, got `{}`", public_url);
        }

        let tag_sample_size = match get("ADDON_TAG_SAMPLE_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("ADDON_TAG_SAMPLE_SIZE must be a number, got `{}`", raw))?,
            None => DEFAULT_TAG_SAMPLE_SIZE,
        };

        Ok(Self {
            bind_addr,
            public_url: public_url.trim_end_matches('/').to_string(),
            cataas_base_url: get("CATAAS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            icon_base_url: get("ADDON_ICON_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ICON_BASE_URL.to_string()),
            tag_sample_size,
        })
    }
}
