// historymidi Config Loader
// Loads and saves the mapping configuration (pitch range, velocity shaping,
// voice count, tempo). The config is stored as a JSON file at the
// platform-specific config path unless an explicit path is given.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::platform;
use crate::types::config::MappingConfig;
use crate::types::errors::ConfigError;

/// Trait defining the config loader interface.
pub trait ConfigLoaderTrait {
    fn load(&mut self) -> Result<MappingConfig, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn get_config(&self) -> &MappingConfig;
    fn set_config(&mut self, config: MappingConfig) -> Result<(), ConfigError>;
    fn get_config_path(&self) -> &str;
}

/// Config loader implementation that persists the config as JSON on disk.
pub struct ConfigLoader {
    config_path: String,
    config: MappingConfig,
}

impl ConfigLoader {
    /// Creates a new ConfigLoader.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `config.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("config.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            config: MappingConfig::default(),
        }
    }
}

impl ConfigLoaderTrait for ConfigLoader {
    /// Loads the config from the JSON file.
    ///
    /// If the file does not exist, returns the default config.
    /// If the file exists but is malformed, returns a serialization error.
    /// A well-formed file with out-of-range values fails validation.
    fn load(&mut self) -> Result<MappingConfig, ConfigError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!(path = %self.config_path, "no config file, using defaults");
            self.config = MappingConfig::default();
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read config file: {}", e)))?;

        let config: MappingConfig = serde_json::from_str(&content).map_err(|e| {
            ConfigError::Serialization(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;

        debug!(path = %self.config_path, "loaded config");
        self.config = config;
        Ok(self.config.clone())
    }

    /// Saves the current config to the JSON file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.config).map_err(|e| {
            ConfigError::Serialization(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| ConfigError::Io(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Returns a reference to the current in-memory config.
    fn get_config(&self) -> &MappingConfig {
        &self.config
    }

    /// Replaces the in-memory config after validating it. Does not save.
    fn set_config(&mut self, config: MappingConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Returns the path to the config file.
    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
