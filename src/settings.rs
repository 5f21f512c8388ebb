//! Runtime configuration, layered from defaults, an optional TOML file, and
//! `INFERSCOPE_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 25MB, sized for inlined base64 images.
const DEFAULT_BODY_LIMIT: i64 = 25 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind: String,
    pub port: u16,
    /// Maximum accepted JSON body size in bytes.
    pub body_limit: usize,
    /// TTF font used for overlay label text; boxes-only rendering without it.
    pub font_path: Option<String>,
    /// Override for the per-region inference runtime base URL.
    pub runtime_base: Option<String>,
    /// Override for the per-region management API base URL.
    pub api_base: Option<String>,
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("bind", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("body_limit", DEFAULT_BODY_LIMIT)?;

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        builder = builder.add_source(Environment::with_prefix("INFERSCOPE"));

        builder.build()?.try_deserialize()
    }
}
