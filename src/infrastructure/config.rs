use std::path::{Path, PathBuf};

use config::ConfigError;
use serde::Deserialize;

use crate::domain::nostr::WireFormat;
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    /// Relay URL written into `e` and `a` tags
    #[serde(default)]
    pub relay_hint: String,
    #[serde(default)]
    pub pretty: bool,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_from(&utils::get_config_dir())
    }

    /// Layers user config files found in `config_dir` over the built-in defaults.
    /// None of the files are required.
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))?;
        let data_dir = utils::get_data_dir();
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?
            .set_default("relay_hint", default_config.relay_hint.clone())?
            .set_default("pretty", default_config.pretty)?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::debug!(
                "No configuration file found in {}, using defaults",
                config_dir.display()
            );
        }

        builder.build()?.try_deserialize()
    }

    pub fn tag_format(&self) -> WireFormat {
        WireFormat::with_relay_hint(self.relay_hint.clone())
    }
}
