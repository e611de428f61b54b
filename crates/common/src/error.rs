use crate::crypto::KeyError;

/// Failures of the crypto engine itself
///
/// These are opaque on purpose: callers surface them, they do not branch on
/// them. The one actionable state, a missing local key, lives in
/// [`MessagingError::NoPrivateKey`].
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("rsa error: {0}")]
    Rsa(#[from] rsa::Error),
    /// Covers both encryption failure and tag verification failure
    #[error("authenticated encryption failed")]
    Aead,
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decrypted message is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid {what} length, expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("failed to gather randomness: {0}")]
    Random(String),
    #[error("key generation task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Errors from operations that touch the local key store
///
/// Generic over the store's own error type so a backend can surface its
/// failures unchanged.
#[derive(Debug, thiserror::Error)]
pub enum MessagingError<E> {
    /// No private key is stored on this device. The user needs to run key
    /// setup before messages addressed to them can be read.
    #[error("no private key found; set up encryption first")]
    NoPrivateKey,
    /// The key store backend failed
    #[error("key store error: {0}")]
    Storage(E),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl<E> MessagingError<E> {
    /// Whether this error should send the user into key setup rather than be
    /// reported as a failure
    pub fn is_setup_required(&self) -> bool {
        matches!(self, MessagingError::NoPrivateKey)
    }
}
