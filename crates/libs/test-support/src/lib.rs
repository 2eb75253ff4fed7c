//! Test-only helpers for building signed forwarding payloads.
//!
//! Production crates in this workspace only ever verify payloads. Tests need
//! the other half, so the encoder lives here and is pulled in as a
//! dev-dependency.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Version byte written by [`PayloadBuilder::new`].
pub const DEFAULT_VERSION: u8 = 0x01;

pub fn hmac_sha256(secret: &str, data: &[u8]) -> [u8; 32] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("hmac accepts keys of any length");
    mac.update(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

pub fn write_var_int(buf: &mut Vec<u8>, mut value: u32) {
    loop {
        if value & !0x7F == 0 {
            buf.push(value as u8);
            return;
        }
        buf.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
}

pub fn write_string(buf: &mut Vec<u8>, value: &str) {
    write_var_int(buf, value.len() as u32);
    buf.extend_from_slice(value.as_bytes());
}

/// Builds `[hmac][version][address][uuid][username][properties][trailing]`.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    version: u8,
    address: String,
    uuid: Uuid,
    username: String,
    properties: Vec<(String, String, String)>,
    trailing: Vec<u8>,
}

impl PayloadBuilder {
    pub fn new(address: &str, uuid: Uuid, username: &str) -> Self {
        Self {
            version: DEFAULT_VERSION,
            address: address.to_owned(),
            uuid,
            username: username.to_owned(),
            properties: Vec::new(),
            trailing: Vec::new(),
        }
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn property(mut self, name: &str, value: &str, signature: Option<&str>) -> Self {
        self.properties.push((name.to_owned(), value.to_owned(), signature.unwrap_or("").to_owned()));
        self
    }

    /// Bytes appended after the last property, outside the signed region.
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.trailing = bytes.to_vec();
        self
    }

    /// Version byte through the last property field.
    pub fn signed_region(&self) -> Vec<u8> {
        let mut buf = vec![self.version];
        write_string(&mut buf, &self.address);
        let (msb, lsb) = self.uuid.as_u64_pair();
        buf.extend_from_slice(&msb.to_be_bytes());
        buf.extend_from_slice(&lsb.to_be_bytes());
        write_string(&mut buf, &self.username);
        write_var_int(&mut buf, self.properties.len() as u32);
        for (name, value, signature) in &self.properties {
            write_string(&mut buf, name);
            write_string(&mut buf, value);
            write_string(&mut buf, signature);
        }
        buf
    }

    pub fn sign(&self, secret: &str) -> Vec<u8> {
        let region = self.signed_region();
        let mut payload = hmac_sha256(secret, &region).to_vec();
        payload.extend_from_slice(&region);
        payload.extend_from_slice(&self.trailing);
        payload
    }
}

/// The reference "Alice" identity used across test suites.
pub fn alice() -> PayloadBuilder {
    PayloadBuilder::new(
        "203.0.113.5",
        Uuid::from_u128(0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10),
        "Alice",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_int_encoding_matches_protocol_examples() {
        let cases: [(u32, &[u8]); 6] = [
            (0, &[0x00]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (25_565, &[0xDD, 0xC7, 0x01]),
            (i32::MAX as u32, &[0xFF, 0xFF, 0xFF, 0xFF, 0x07]),
            (u32::MAX, &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
        ];
        for (value, expected) in cases {
            let mut buf = Vec::new();
            write_var_int(&mut buf, value);
            assert_eq!(buf, expected, "value {value}");
        }
    }

    #[test]
    fn signed_payload_layout() {
        let payload = alice().sign("topsecret");
        assert_eq!(payload[32], DEFAULT_VERSION);
        assert_eq!(&payload[33..45], b"\x0b203.0.113.5");
        assert_eq!(payload[45..61], (1u8..=16).collect::<Vec<_>>()[..]);
        assert_eq!(&payload[61..67], b"\x05Alice");
        assert_eq!(payload[67], 0);
        assert_eq!(payload.len(), 68);
        assert_eq!(payload[..32], hmac_sha256("topsecret", &payload[32..]));
    }
}
