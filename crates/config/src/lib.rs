//! Configuration loading, validation, and env substitution.
//!
//! Config files: `minilla.toml`, `minilla.yaml`, or `minilla.json`
//! Searched in `./` then `~/.config/minilla/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{apply_env_overrides, config_dir, discover_and_load, load_config},
    schema::{
        CommandsConfig, DatabaseConfig, DiscordConfig, MinillaConfig, ParseFailurePolicy,
    },
    validate::{Diagnostic, Severity, ValidationResult, validate},
};
