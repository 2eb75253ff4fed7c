use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Checks `claimed_signature` against HMAC-SHA256(`secret`, `signed_bytes`).
///
/// The secret is used as raw UTF-8 key bytes. The comparison runs in
/// constant time; a claimed signature of any length other than 32 bytes never
/// matches.
pub fn verify(signed_bytes: &[u8], claimed_signature: &[u8], secret: &str) -> bool {
    let Ok(mut mac) = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(signed_bytes);
    mac.verify_slice(claimed_signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2.
    const RFC4231_KEY: &str = "Jefe";
    const RFC4231_DATA: &[u8] = b"what do ya want for nothing?";
    const RFC4231_MAC: &str = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";

    fn rfc_mac() -> Vec<u8> {
        hex::decode(RFC4231_MAC).expect("hex")
    }

    #[test]
    fn accepts_known_vector() {
        assert!(verify(RFC4231_DATA, &rfc_mac(), RFC4231_KEY));
    }

    #[test]
    fn rejects_wrong_key() {
        assert!(!verify(RFC4231_DATA, &rfc_mac(), "jefe"));
    }

    #[test]
    fn rejects_modified_data() {
        assert!(!verify(b"what do ya want for nothing!", &rfc_mac(), RFC4231_KEY));
    }

    #[test]
    fn rejects_truncated_or_extended_signature() {
        let mac = rfc_mac();
        assert!(!verify(RFC4231_DATA, &mac[..31], RFC4231_KEY));
        let mut extended = mac.clone();
        extended.push(0);
        assert!(!verify(RFC4231_DATA, &extended, RFC4231_KEY));
        assert!(!verify(RFC4231_DATA, &[], RFC4231_KEY));
    }

    #[test]
    fn empty_secret_is_still_a_key() {
        let mac = test_support::hmac_sha256("", RFC4231_DATA);
        assert!(verify(RFC4231_DATA, &mac, ""));
        assert!(!verify(RFC4231_DATA, &mac, RFC4231_KEY));
    }
}
