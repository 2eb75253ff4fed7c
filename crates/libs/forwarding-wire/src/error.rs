/// Field-level decode failures.
///
/// Every variant describes a payload that is malformed or hostile. None of
/// them can succeed on retry with the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("payload ended before the field was complete")]
    Truncated,

    #[error("var-int exceeds {max} bytes", max = crate::MAX_VAR_INT_LEN)]
    VarIntTooLong,

    #[error("declared length {declared} exceeds limit {limit}")]
    LengthOutOfBounds { declared: usize, limit: usize },

    #[error("string field is not valid UTF-8")]
    InvalidEncoding,
}

impl DecodeError {
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Errors from [`decode_and_verify`](crate::decode_and_verify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ForwardingError {
    #[error("payload too short: no room for a {len}-byte signature", len = crate::SIGNATURE_LEN)]
    Truncated,

    #[error("unsupported forwarding version: {0}")]
    UnsupportedVersion(u8),

    #[error("malformed forwarding payload: {0}")]
    Malformed(#[from] DecodeError),

    #[error("forwarding signature does not match")]
    SignatureMismatch,
}

impl ForwardingError {
    /// Always `false`: a rejected payload is rejected for good.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// `true` only for the authentication failure itself.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::SignatureMismatch)
    }
}
