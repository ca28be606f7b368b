//! Configuration loading
//!
//! Layers, lowest to highest precedence: built-in defaults, a config file
//! (`chartgen.toml`, `.chartgen.yml` or an explicit `--config` path), then
//! `CHARTGEN_*` environment variables. CLI flags are merged on top by
//! [`merge_cli_with_config`].

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::Path;

/// Config files looked up in the anchor directory, first match wins.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["chartgen.toml", ".chartgen.yml", ".chartgen.yaml"];

/// Prefix of environment variables read into [`Config`].
pub const ENV_PREFIX: &str = "CHARTGEN_";

/// Keys whose environment values are taken verbatim. Namespaces and paths
/// like `2024` or `007` must not be coerced into numbers.
const VERBATIM_ENV_KEYS: [&str; 3] = ["namespace", "output", "kubectl"];

pub fn load_config(anchor: &Path, explicit: Option<&Path>) -> Result<Config> {
    load_layered(anchor, explicit, ENV_PREFIX)
}

fn load_layered(anchor: &Path, explicit: Option<&Path>, env_prefix: &str) -> Result<Config> {
    let mut figment = Figment::new();

    match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            figment = merge_file(figment, path);
        }
        None => {
            if let Some(path) =
                CONFIG_FILE_NAMES.iter().map(|name| anchor.join(name)).find(|p| p.is_file())
            {
                figment = merge_file(figment, &path);
            }
        }
    }

    figment = figment.merge(Env::prefixed(env_prefix).ignore(&VERBATIM_ENV_KEYS));
    for key in VERBATIM_ENV_KEYS {
        if let Some(value) = Env::var(&format!("{env_prefix}{}", key.to_uppercase())) {
            figment = figment.merge(Serialized::default(key, value));
        }
    }

    figment
        .extract()
        .context("invalid chartgen configuration")
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    tracing::debug!(path = %path.display(), "loading config file");
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml" | "yaml") => figment.merge(Yaml::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}
