use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{env_subst::substitute_env, schema::MinillaConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "minilla.toml",
    "minilla.yaml",
    "minilla.yml",
    "minilla.json",
];

/// Env var overriding `discord.token`.
pub const TOKEN_ENV: &str = "MINILLA_CLIENT_TOKEN";
/// Env var overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "MINILLA_DATABASE_URL";

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<MinillaConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./minilla.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/minilla/minilla.{toml,yaml,yml,json}` (user-global)
///
/// Returns `MinillaConfig::default()` if no config file is found or it fails
/// to parse. Env overrides are applied in every case.
pub fn discover_and_load() -> MinillaConfig {
    let mut config = match find_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                MinillaConfig::default()
            })
        },
        None => {
            debug!("no config file found, using defaults");
            MinillaConfig::default()
        },
    };
    apply_env_overrides(&mut config);
    config
}

/// Overlay `MINILLA_CLIENT_TOKEN` and `MINILLA_DATABASE_URL` onto `config`.
pub fn apply_env_overrides(config: &mut MinillaConfig) {
    apply_env_overrides_with(config, |name| std::env::var(name).ok());
}

fn apply_env_overrides_with(config: &mut MinillaConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.is_empty()) {
        debug!(var = TOKEN_ENV, "discord token taken from environment");
        config.discord.token = Secret::new(token);
    }
    if let Some(url) = lookup(DATABASE_URL_ENV).filter(|u| !u.is_empty()) {
        debug!(var = DATABASE_URL_ENV, "database url taken from environment");
        config.database.url = url;
    }
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/minilla/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "minilla").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<MinillaConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
