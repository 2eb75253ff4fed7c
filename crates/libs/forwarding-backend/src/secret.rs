use std::fmt;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder written into fresh configs. Never accepted as a real secret.
pub const DEFAULT_SECRET: &str = "CHANGE_ME";

/// Shared proxy/backend forwarding secret.
///
/// Wiped from memory on drop and redacted from `Debug` output.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct ForwardingSecret(String);

impl ForwardingSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SECRET
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for ForwardingSecret {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET)
    }
}

/// Compares in constant time for equal-length secrets.
impl PartialEq for ForwardingSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl Eq for ForwardingSecret {}

impl fmt::Debug for ForwardingSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ForwardingSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let secret = ForwardingSecret::new("hunter2");
        assert!(!format!("{secret:?}").contains("hunter2"));
    }

    #[test]
    fn equality_compares_full_contents() {
        assert_eq!(ForwardingSecret::new("hunter2"), ForwardingSecret::new("hunter2"));
        assert_ne!(ForwardingSecret::new("hunter2"), ForwardingSecret::new("hunter3"));
        assert_ne!(ForwardingSecret::new("hunter2"), ForwardingSecret::new("hunter"));
        assert_ne!(ForwardingSecret::new(""), ForwardingSecret::new("x"));
        assert_eq!(ForwardingSecret::new(""), ForwardingSecret::new(""));
    }

    #[test]
    fn default_is_placeholder() {
        let secret = ForwardingSecret::default();
        assert!(secret.is_default());
        assert!(!secret.is_blank());
        assert!(ForwardingSecret::new("  ").is_blank());
    }
}
