//! # uuid-sync
//!
//! Proxy-side companion to modern forwarding: remembers the authenticated
//! UUID of every player that logs in, so offline-mode backends behind the
//! proxy can be served the same identity.

pub mod config;
pub mod store;
pub mod sync;

pub use config::SyncConfig;
pub use store::UuidStore;
pub use sync::{PlayerInfo, PreConnectDecision, UuidSync};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config encode error: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("stored uuid is corrupt: {0}")]
    CorruptMapping(String),
}
