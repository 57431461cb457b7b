// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./growthpilot.toml` > `~/.config/growthpilot/growthpilot.toml`
//! > `/etc/growthpilot/growthpilot.toml` with environment variable overrides
//! via `GROWTHPILOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GrowthPilotConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/growthpilot/growthpilot.toml` (system-wide)
/// 3. `~/.config/growthpilot/growthpilot.toml` (user XDG config)
/// 4. `./growthpilot.toml` (local directory)
/// 5. `GROWTHPILOT_*` environment variables
pub fn load_config() -> Result<GrowthPilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GrowthPilotConfig::default()))
        .merge(Toml::file("/etc/growthpilot/growthpilot.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("growthpilot/growthpilot.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("growthpilot.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<GrowthPilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GrowthPilotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GrowthPilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GrowthPilotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `GROWTHPILOT_GEMINI_API_KEY` must map
/// to `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("GROWTHPILOT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: GROWTHPILOT_GEMINI_API_KEY -> "gemini_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
