//! Login-phase glue: asks the proxy for forwarding data and applies the
//! verified identity to the connection.

use forwarding_wire::{
    decode_and_verify_with_limits, DecodeLimits, ForwardingError, MODERN_FORWARDING_VERSION,
    PLAYER_INFO_CHANNEL,
};

use crate::config::{ConfigError, ConfigHandle};
use crate::profile::GameProfile;

/// Login plugin request sent to the client before the login completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfoQuery {
    pub message_id: i32,
    pub channel: &'static str,
    pub data: Vec<u8>,
}

/// Per-connection login state owned by the host.
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// Human-readable peer description used in log lines.
    pub connection_info: String,
    pub profile: GameProfile,
    /// Address reported by the proxy once forwarding succeeded.
    pub forwarded_address: Option<String>,
}

impl LoginSession {
    pub fn new(connection_info: impl Into<String>, profile: GameProfile) -> Self {
        Self { connection_info: connection_info.into(), profile, forwarded_address: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("forwarding secret not configured")]
    SecretNotConfigured,

    #[error("forwarding config unavailable")]
    ConfigUnavailable,

    #[error("client sent no forwarding data")]
    MissingForwardingData,

    #[error(transparent)]
    Forwarding(#[from] ForwardingError),
}

impl RejectReason {
    /// Text shown to the disconnected player.
    pub fn disconnect_message(&self) -> &'static str {
        match self {
            Self::SecretNotConfigured | Self::ConfigUnavailable => {
                "This server's player forwarding is not configured."
            }
            Self::MissingForwardingData => "This server requires you to connect through its proxy.",
            Self::Forwarding(ForwardingError::SignatureMismatch) => {
                "Unable to verify player details."
            }
            Self::Forwarding(_) => "Invalid player info forwarding data.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The session profile now carries the forwarded identity.
    Accepted,
    /// The connection must be closed with [`RejectReason::disconnect_message`].
    Rejected(RejectReason),
}

impl LoginOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

pub struct ForwardingLoginHandler {
    config: ConfigHandle,
    limits: DecodeLimits,
}

impl ForwardingLoginHandler {
    pub fn new(config: ConfigHandle) -> Self {
        Self { config, limits: DecodeLimits::default() }
    }

    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn player_info_request(message_id: i32) -> PlayerInfoQuery {
        PlayerInfoQuery {
            message_id,
            channel: PLAYER_INFO_CHANNEL,
            data: vec![MODERN_FORWARDING_VERSION],
        }
    }

    /// Verifies the proxy's answer to [`player_info_request`](Self::player_info_request)
    /// and, on success, replaces the session profile.
    ///
    /// The config is read on every call, so a reloaded secret applies to the
    /// next login without further coordination.
    pub fn handle_query_response(
        &self,
        session: &mut LoginSession,
        response: Option<&[u8]>,
    ) -> LoginOutcome {
        let config = match self.config.snapshot() {
            Ok(config) => config,
            Err(err) => {
                log::error!("Rejecting connection from {} - {err}", session.connection_info);
                return LoginOutcome::Rejected(err.into());
            }
        };

        if let Err(err) = config.validate() {
            log::error!(
                "Rejecting connection from {} - Forwarding secret not configured: {err}",
                session.connection_info
            );
            return LoginOutcome::Rejected(err.into());
        }

        let Some(payload) = response else {
            log::warn!(
                "Rejecting connection from {} - no forwarding data in login response",
                session.connection_info
            );
            return LoginOutcome::Rejected(RejectReason::MissingForwardingData);
        };

        let identity =
            match decode_and_verify_with_limits(payload, config.secret.expose(), &self.limits) {
                Ok(identity) => identity,
                Err(err) => {
                    if err.is_authentication_failure() {
                        log::error!(
                            "Rejecting connection from {} - Invalid signature: {err}",
                            session.connection_info
                        );
                    } else {
                        log::warn!(
                            "Rejecting connection from {} - {err}",
                            session.connection_info
                        );
                    }
                    return LoginOutcome::Rejected(err.into());
                }
            };

        session.profile = GameProfile::from_identity(&identity);
        session.forwarded_address = Some(identity.remote_address().to_owned());

        if config.debug {
            log::info!(
                "Applied forwarding for player {} with UUID {}",
                session.profile.name,
                session.profile.id
            );
            log::info!("Original address: {}", identity.remote_address());
        }
        LoginOutcome::Accepted
    }
}

impl From<ConfigError> for RejectReason {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::DefaultSecret | ConfigError::EmptySecret => Self::SecretNotConfigured,
            _ => Self::ConfigUnavailable,
        }
    }
}
