//! Cryptographic primitives for sealpost
//!
//! This module provides the hybrid encryption scheme used for private messages:
//!
//! - **Identity**: an RSA-2048 keypair per user, OAEP padding with SHA-256
//! - **Content Encryption**: AES-256-GCM with a fresh key and nonce for every message
//! - **Key Wrapping**: the content key is encrypted to the recipient's RSA public key
//!
//! # Security Model
//!
//! ## Identity Keys
//! Each user holds one RSA keypair. The public half is published (as a JWK string)
//! so that others can write to the user; the private half never leaves the device
//! and is only ever handed to a [`KeyStore`](crate::key_store::KeyStore).
//!
//! ## Content Encryption
//! Every message gets its own 256-bit content key and 96-bit nonce. Neither is
//! cached or reused, so a nonce is never paired twice with the same key.
//!
//! ## Message Protocol
//! To write a message for a recipient:
//! 1. Import the recipient's public JWK (encrypt-only)
//! 2. Generate a content key and a nonce
//! 3. Encrypt the UTF-8 message with AES-256-GCM
//! 4. Wrap the raw content key with RSA-OAEP-SHA256
//! 5. Ship `ciphertext`, `base64(wrapped_key)` and `base64(nonce)` together
//!
//! The recipient reverses it:
//! 1. Import their own private JWK (decrypt-only)
//! 2. Unwrap the content key
//! 3. Decrypt and authenticate the ciphertext
//! 4. Decode the plaintext as UTF-8

mod content_key;
mod encoding;
mod keys;
mod message;

pub use content_key::{CONTENT_KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use encoding::{from_base64, to_base64};
pub use keys::{
    generate_key_pair, DecryptionKey, EncryptionKey, KeyError, KeyPair, KeyUsage, JWK_ALGORITHM,
    RSA_MODULUS_BITS, RSA_PUBLIC_EXPONENT,
};
pub use message::{decrypt_message_for, decrypt_message_with, encrypt_message, encrypt_message_for};

#[cfg(test)]
pub(crate) mod test_utils;
