//! # forwarding-backend
//!
//! Backend-side integration for modern forwarding: configuration of the
//! shared secret, the login query exchange, and replacement of the
//! connection's profile with the proxy-verified identity.
//!
//! Decoding and verification live in [`forwarding_wire`]; this crate owns
//! everything around them (secret lifecycle, logging, rejection policy).

pub mod config;
pub mod login;
pub mod profile;
pub mod secret;

pub use config::{ConfigError, ConfigHandle, ForwarderConfig, DEFAULT_CONFIG_PATH};
pub use login::{ForwardingLoginHandler, LoginOutcome, LoginSession, PlayerInfoQuery, RejectReason};
pub use profile::GameProfile;
pub use secret::{ForwardingSecret, DEFAULT_SECRET};
