use uuid::Uuid;

use crate::config::SyncConfig;
use crate::store::UuidStore;

/// Player as seen by the proxy after online-mode authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub username: String,
    pub uuid: Uuid,
}

impl PlayerInfo {
    pub fn new(username: impl Into<String>, uuid: Uuid) -> Self {
        Self { username: username.into(), uuid }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreConnectDecision {
    /// The event carried no target server.
    NoTarget,
    OfflineMode,
    OnlineMode,
}

/// Proxy event handlers that record and look up authenticated UUIDs.
///
/// Storage failures are logged and swallowed: they must never block a login.
pub struct UuidSync {
    config: SyncConfig,
    store: UuidStore,
}

impl UuidSync {
    pub fn new(config: SyncConfig, store: UuidStore) -> Self {
        log::info!("monitoring offline-mode servers: {:?}", config.offline_mode_servers);
        Self { config, store }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &UuidStore {
        &self.store
    }

    pub fn on_login(&self, player: &PlayerInfo) {
        match self.store.store_mapping(&player.username, player.uuid) {
            Ok(()) => {
                if self.config.debug {
                    log::info!("stored UUID mapping: {} -> {}", player.username, player.uuid);
                }
            }
            Err(err) => {
                log::error!("failed to store UUID mapping for player {}: {err}", player.username)
            }
        }
    }

    pub fn on_server_pre_connect(
        &self,
        player: &PlayerInfo,
        target_server: Option<&str>,
    ) -> PreConnectDecision {
        let Some(server) = target_server else {
            log::warn!("pre-connect without a target server for player {}", player.username);
            return PreConnectDecision::NoTarget;
        };

        if !self.config.is_offline_mode_server(server) {
            return PreConnectDecision::OnlineMode;
        }
        if self.config.debug {
            log::info!(
                "player {} ({}) is connecting to offline-mode server {server}",
                player.username,
                player.uuid
            );
        }
        PreConnectDecision::OfflineMode
    }

    pub fn on_game_profile_request(&self, username: &str) -> Option<Uuid> {
        match self.store.get_uuid(username) {
            Ok(stored) => {
                if let (Some(uuid), true) = (stored, self.config.debug) {
                    log::info!("game profile request for {username}: stored UUID is {uuid}");
                }
                stored
            }
            Err(err) => {
                log::error!("failed to retrieve UUID for player {username}: {err}");
                None
            }
        }
    }
}
