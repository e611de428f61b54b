//! Per-message content encryption using AES-256-GCM
//!
//! Every message gets its own [`ContentKey`] and [`MessageNonce`]. The key is
//! wiped from memory when dropped and is only ever exported to be wrapped for
//! a recipient.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Size of an AES-256-GCM key in bytes
pub const CONTENT_KEY_SIZE: usize = 32;
/// Size of an AES-GCM nonce in bytes
pub const NONCE_SIZE: usize = 12;
/// Size of the AES-GCM authentication tag appended to every ciphertext
pub const TAG_SIZE: usize = 16;

fn random_bytes<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut buff = [0u8; N];
    getrandom::getrandom(&mut buff).map_err(|e| CryptoError::Random(e.to_string()))?;
    Ok(buff)
}

/// A single-use 256-bit symmetric key
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct ContentKey([u8; CONTENT_KEY_SIZE]);

impl ContentKey {
    /// Generate a new random key using the OS RNG
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self(random_bytes()?))
    }

    /// Import raw key bytes recovered from a wrapped key package
    pub fn from_slice(data: &[u8]) -> Result<Self, CryptoError> {
        if data.len() != CONTENT_KEY_SIZE {
            return Err(CryptoError::InvalidLength {
                what: "content key",
                expected: CONTENT_KEY_SIZE,
                actual: data.len(),
            });
        }
        let mut buff = [0u8; CONTENT_KEY_SIZE];
        buff.copy_from_slice(data);
        Ok(Self(buff))
    }

    /// Raw key bytes, for wrapping only
    pub fn export(&self) -> &[u8] {
        &self.0
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }

    /// Encrypt `plaintext`; the output is `ciphertext || tag`
    pub fn encrypt(&self, nonce: &MessageNonce, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.cipher()
            .encrypt(Nonce::from_slice(nonce.bytes()), plaintext)
            .map_err(|_| CryptoError::Aead)
    }

    /// Decrypt and authenticate `ciphertext || tag`
    pub fn decrypt(&self, nonce: &MessageNonce, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.cipher()
            .decrypt(Nonce::from_slice(nonce.bytes()), ciphertext)
            .map_err(|_| CryptoError::Aead)
    }
}

/// A 96-bit AES-GCM nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MessageNonce([u8; NONCE_SIZE]);

impl MessageNonce {
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self(random_bytes()?))
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, CryptoError> {
        if data.len() != NONCE_SIZE {
            return Err(CryptoError::InvalidLength {
                what: "nonce",
                expected: NONCE_SIZE,
                actual: data.len(),
            });
        }
        let mut buff = [0u8; NONCE_SIZE];
        buff.copy_from_slice(data);
        Ok(Self(buff))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}
