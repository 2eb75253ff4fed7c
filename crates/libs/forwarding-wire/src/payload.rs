//! Forwarding payload decode and verification.

use uuid::Uuid;

use crate::fields::{read_properties, read_string, read_uuid, Property};
use crate::reader::Reader;
use crate::signature::verify;
use crate::{DecodeError, ForwardingError, MODERN_FORWARDING_VERSION, SIGNATURE_LEN};

/// Upper bounds applied to attacker-controlled lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum declared byte length of any single string field.
    pub max_string_len: usize,
    /// Maximum declared number of profile properties.
    pub max_properties: usize,
}

impl DecodeLimits {
    pub const DEFAULT_MAX_STRING_LEN: usize = 65_536;
    pub const DEFAULT_MAX_PROPERTIES: usize = 64;
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_string_len: Self::DEFAULT_MAX_STRING_LEN,
            max_properties: Self::DEFAULT_MAX_PROPERTIES,
        }
    }
}

/// A player identity asserted by the proxy and authenticated by its MAC.
///
/// Only [`decode_and_verify`] constructs this type, and only after the
/// signature check has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingIdentity {
    remote_address: String,
    uuid: Uuid,
    username: String,
    properties: Vec<Property>,
}

impl ForwardingIdentity {
    /// Client address as reported by the proxy. Not validated.
    pub fn remote_address(&self) -> &str {
        &self.remote_address
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Properties in wire order, duplicates included.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// First property named `name`.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn into_parts(self) -> (String, Uuid, String, Vec<Property>) {
        (self.remote_address, self.uuid, self.username, self.properties)
    }
}

/// Decodes `raw_payload` and verifies its MAC under `secret` with default limits.
pub fn decode_and_verify(
    raw_payload: &[u8],
    secret: &str,
) -> Result<ForwardingIdentity, ForwardingError> {
    decode_and_verify_with_limits(raw_payload, secret, &DecodeLimits::default())
}

/// Decodes `raw_payload` and verifies its MAC under `secret`.
///
/// Layout: `[signature:32][version:1][address][uuid:16][username][properties]`.
/// The MAC covers the version byte through the last decoded property; bytes
/// after that are ignored.
pub fn decode_and_verify_with_limits(
    raw_payload: &[u8],
    secret: &str,
    limits: &DecodeLimits,
) -> Result<ForwardingIdentity, ForwardingError> {
    if raw_payload.len() < SIGNATURE_LEN {
        return Err(ForwardingError::Truncated);
    }
    let (claimed_signature, body) = raw_payload.split_at(SIGNATURE_LEN);

    let mut reader = Reader::new(body);
    let version = reader.read_u8()?;
    if version != MODERN_FORWARDING_VERSION {
        return Err(ForwardingError::UnsupportedVersion(version));
    }

    let fields = decode_fields(&mut reader, limits)?;

    if !verify(reader.consumed(), claimed_signature, secret) {
        return Err(ForwardingError::SignatureMismatch);
    }

    let (remote_address, uuid, username, properties) = fields;
    Ok(ForwardingIdentity { remote_address, uuid, username, properties })
}

type DecodedFields = (String, Uuid, String, Vec<Property>);

fn decode_fields(
    reader: &mut Reader<'_>,
    limits: &DecodeLimits,
) -> Result<DecodedFields, DecodeError> {
    let remote_address = read_string(reader, limits.max_string_len)?;
    let uuid = read_uuid(reader)?;
    let username = read_string(reader, limits.max_string_len)?;
    let properties = read_properties(reader, limits)?;
    Ok((remote_address, uuid, username, properties))
}
