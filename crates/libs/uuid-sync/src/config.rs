use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SyncError;

pub const CONFIG_FILE: &str = "config.toml";

/// Proxy-side sync settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SyncConfig {
    /// Backend server names running in offline mode.
    pub offline_mode_servers: Vec<String>,
    pub debug: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { offline_mode_servers: vec!["create".to_owned()], debug: false }
    }
}

impl SyncConfig {
    pub fn from_toml(input: &str) -> Result<Self, SyncError> {
        let mut config: Self = toml::from_str(input)?;
        config.normalize();
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SyncError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Loads `config.toml` from `data_dir`, writing the defaults first if the
    /// directory or file is missing.
    pub fn load_or_create(data_dir: &Path) -> Result<Self, SyncError> {
        let path = data_dir.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => return Self::from_toml(&contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        fs::create_dir_all(data_dir)?;
        let config = Self::default();
        fs::write(&path, toml::to_string(&config)?)?;
        Ok(config)
    }

    pub fn is_offline_mode_server(&self, server_name: &str) -> bool {
        let wanted = server_name.to_lowercase();
        self.offline_mode_servers.iter().any(|name| *name == wanted)
    }

    fn normalize(&mut self) {
        self.offline_mode_servers = self
            .offline_mode_servers
            .iter()
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
    }
}
