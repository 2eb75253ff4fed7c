use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::secret::ForwardingSecret;

pub const DEFAULT_CONFIG_PATH: &str = "config/modern-forwarding.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("forwarding secret is still the default placeholder")]
    DefaultSecret,

    #[error("forwarding secret is empty")]
    EmptySecret,

    #[error("config io error: {0}")]
    Io(#[from] io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config encode error: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("config lock poisoned")]
    Poisoned,
}

/// Backend forwarding settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwarderConfig {
    pub secret: ForwardingSecret,
    pub debug: bool,
}

impl ForwarderConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Loads `path`, writing and returning the defaults when it does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => return Self::from_toml(&contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Writes the config atomically with owner-only permissions.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let encoded = self.to_toml()?;
        write_private_file(path, encoded.as_bytes())?;
        Ok(())
    }

    /// Rejects secrets that would let anyone forge a payload.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_blank() {
            return Err(ConfigError::EmptySecret);
        }
        if self.secret.is_default() {
            return Err(ConfigError::DefaultSecret);
        }
        Ok(())
    }
}

/// Shared, reloadable view of a [`ForwarderConfig`].
///
/// Clones share the same underlying config; a reload is visible to every
/// clone on its next [`snapshot`](Self::snapshot).
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    inner: Arc<RwLock<ForwarderConfig>>,
}

impl ConfigHandle {
    pub fn new(config: ForwarderConfig) -> Self {
        Self { inner: Arc::new(RwLock::new(config)) }
    }

    pub fn snapshot(&self) -> Result<ForwarderConfig, ConfigError> {
        self.inner.read().map(|config| config.clone()).map_err(|_| ConfigError::Poisoned)
    }

    pub fn replace(&self, config: ForwarderConfig) -> Result<(), ConfigError> {
        let mut guard = self.inner.write().map_err(|_| ConfigError::Poisoned)?;
        *guard = config;
        Ok(())
    }

    /// Re-reads `path`. On failure the current config stays in place.
    pub fn reload(&self, path: &Path) -> Result<(), ConfigError> {
        let config = ForwarderConfig::from_path(path)?;
        self.replace(config)?;
        log::info!("reloaded forwarding config from {}", path.display());
        Ok(())
    }
}

fn write_private_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let unique = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path = path.with_extension(format!("tmp-{unique}"));
    write_new_private(&tmp_path, contents)?;

    #[cfg(windows)]
    if path.exists() {
        let _ = fs::remove_file(path);
    }

    fs::rename(&tmp_path, path)
}

fn write_new_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
