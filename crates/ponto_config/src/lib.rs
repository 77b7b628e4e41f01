//! Configuration for the Ponto PWA toolkit.
//!
//! Values are layered from `config/default.*`, `config/{RUN_ENV}.*` and
//! `PONTO__*` environment variables. Every section has serde defaults, so an
//! empty environment still yields a usable configuration.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::Path;
use tracing::debug;

pub mod models;
pub use models::*;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PONTO";

/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// `DOTENV_OVERRIDE` selects a different file; the default is `.env` in the
/// working directory. A missing file is not an error. Returns the path that
/// was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

/// Loads the configuration from the directory named by `CONFIG_DIR`
/// (default `config`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from(Path::new(&config_dir))
}

/// Loads the configuration from an explicit directory.
///
/// `default.*` is read first, then the file named after `RUN_ENV`
/// (default `debug`), then environment variables such as
/// `PONTO__SERVER__PORT`.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    debug!(
        default_path = %default_path.display(),
        env_path = %env_path.display(),
        "Loading configuration"
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}
