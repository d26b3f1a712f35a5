//! Locating the cart service configuration.

use anyhow::Context;
use cart_http::CartApiConfig;
use std::path::Path;

const CONFIG_PATHS: [&str; 2] = ["config/cart.toml", "../config/cart.toml"];

/// Load config from an explicit file, a well-known file, or the environment
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<CartApiConfig> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return CartApiConfig::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()));
    }

    for path in CONFIG_PATHS {
        if let Ok(content) = std::fs::read_to_string(path) {
            let config = CartApiConfig::from_toml(&content)
                .with_context(|| format!("Failed to parse {path}"))?;
            tracing::info!("Loaded cart config from {}", path);
            return Ok(config);
        }
    }

    tracing::debug!("No cart config file found, reading environment");
    Ok(CartApiConfig::from_env()?)
}
