//! # forwarding-wire
//!
//! Decoder and verifier for modern player-info forwarding payloads.
//!
//! A forwarding proxy answers the backend's `velocity:player_info` login query
//! with the player's authenticated identity, signed with HMAC-SHA256 under a
//! secret shared between proxy and backend. This crate turns that response into
//! a [`ForwardingIdentity`], or a typed [`ForwardingError`] when the payload is
//! malformed, uses another version, or fails authentication.
//!
//! The crate does no I/O and keeps no state. The secret is passed on every
//! call.
//!
//! ## Wire Format (version 1)
//!
//! ```text
//! [signature:32][version:1][address][uuid:16][username][count][property...]
//!  HMAC-SHA256     0x01     string   msb|lsb   string  varint name|value|signature
//! ```
//!
//! Strings are a var-int byte length followed by UTF-8. An empty property
//! signature means the property is unsigned.
//!
//! ## Example
//!
//! ```rust
//! use forwarding_wire::{decode_and_verify, ForwardingError};
//!
//! let payload = [0u8; 32];
//! assert!(matches!(
//!     decode_and_verify(&payload, "secret"),
//!     Err(ForwardingError::Malformed(_))
//! ));
//! ```

mod error;
pub mod fields;
mod payload;
pub mod reader;
pub mod signature;

pub use error::{DecodeError, ForwardingError};
pub use fields::Property;
pub use payload::{decode_and_verify, decode_and_verify_with_limits, DecodeLimits, ForwardingIdentity};

/// The only forwarding version this crate accepts.
pub const MODERN_FORWARDING_VERSION: u8 = 0x01;

/// Length of the HMAC-SHA256 prefix.
pub const SIGNATURE_LEN: usize = 32;

/// Maximum encoded length of a var-int.
pub const MAX_VAR_INT_LEN: usize = 5;

/// Login query channel the backend uses to request forwarding data.
pub const PLAYER_INFO_CHANNEL: &str = "velocity:player_info";
