//! Length-prefixed field readers built on [`Reader`].

use uuid::Uuid;

use crate::reader::Reader;
use crate::{DecodeError, DecodeLimits};

/// A signed or unsigned profile property (skin textures and the like).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    pub name: String,
    pub value: String,
    /// Identity-provider signature over `value`, carried verbatim.
    pub signature: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into(), signature: None }
    }

    pub fn signed(
        name: impl Into<String>,
        value: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), value: value.into(), signature: Some(signature.into()) }
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

/// Reads a var-int length followed by that many UTF-8 bytes.
///
/// The declared length is checked against `max_len` before the buffer is
/// consulted, so a hostile prefix never drives an allocation.
pub fn read_string(reader: &mut Reader<'_>, max_len: usize) -> Result<String, DecodeError> {
    let declared = usize::try_from(reader.read_var_int()?).unwrap_or(usize::MAX);
    if declared > max_len {
        return Err(DecodeError::LengthOutOfBounds { declared, limit: max_len });
    }
    let bytes = reader.read_bytes(declared)?;
    let text = core::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidEncoding)?;
    Ok(text.to_owned())
}

/// Reads two big-endian `u64` halves, most significant first.
pub fn read_uuid(reader: &mut Reader<'_>) -> Result<Uuid, DecodeError> {
    if reader.remaining() < 16 {
        return Err(DecodeError::Truncated);
    }
    let most_significant = reader.read_u64_be()?;
    let least_significant = reader.read_u64_be()?;
    Ok(Uuid::from_u64_pair(most_significant, least_significant))
}

/// Reads a var-int count followed by `(name, value, signature)` string triples.
pub fn read_properties(
    reader: &mut Reader<'_>,
    limits: &DecodeLimits,
) -> Result<Vec<Property>, DecodeError> {
    let declared = usize::try_from(reader.read_var_int()?).unwrap_or(usize::MAX);
    if declared > limits.max_properties {
        return Err(DecodeError::LengthOutOfBounds { declared, limit: limits.max_properties });
    }

    // Each property is at least three empty-string prefixes.
    let mut properties = Vec::with_capacity(declared.min(reader.remaining() / 3));
    for _ in 0..declared {
        let name = read_string(reader, limits.max_string_len)?;
        let value = read_string(reader, limits.max_string_len)?;
        let signature = read_string(reader, limits.max_string_len)?;
        properties.push(Property {
            name,
            value,
            signature: if signature.is_empty() { None } else { Some(signature) },
        });
    }
    Ok(properties)
}
