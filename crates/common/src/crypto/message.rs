//! Hybrid encryption of message text
//!
//! A message is sealed under a fresh AES-256-GCM content key, and that key is
//! wrapped for the recipient with RSA-OAEP-SHA256:
//!
//! ```text
//! encrypted_data      = AES-256-GCM(content_key, nonce, utf8(message))
//! encrypted_key_package = base64(RSA-OAEP-SHA256(recipient_pub, content_key))
//! nonce               = base64(nonce)
//! ```
//!
//! # Examples
//!
//! ```ignore
//! let bob = KeyPair::generate()?;
//!
//! // Alice only needs Bob's public JWK
//! let sealed = encrypt_message("hello", &bob.public_key_jwk)?;
//!
//! // Bob opens it with his private JWK
//! let text = decrypt_message_with(
//!     &bob.private_key_jwk,
//!     &sealed.encrypted_data,
//!     &sealed.encrypted_key_package,
//!     &sealed.nonce,
//! )?;
//! assert_eq!(text, "hello");
//! ```

use zeroize::Zeroizing;

use super::content_key::{ContentKey, MessageNonce};
use super::encoding::{from_base64, to_base64};
use super::keys::{DecryptionKey, EncryptionKey};
use crate::envelope::EncryptedMessage;
use crate::error::CryptoError;

/// Encrypt `message` for the owner of `recipient_public_key_jwk`
///
/// The recipient key is imported before anything else happens, so a malformed
/// or mismatched JWK aborts the call without producing ciphertext. An empty
/// message is valid and yields a tag-only ciphertext.
///
/// # Errors
///
/// Returns an error if the JWK cannot be imported as an encryption key, or if
/// the system RNG or the underlying ciphers fail.
pub fn encrypt_message(
    message: &str,
    recipient_public_key_jwk: &str,
) -> Result<EncryptedMessage, CryptoError> {
    let recipient = EncryptionKey::from_jwk(recipient_public_key_jwk)?;
    encrypt_message_for(message, &recipient)
}

/// Encrypt `message` for an already imported recipient key
pub fn encrypt_message_for(
    message: &str,
    recipient: &EncryptionKey,
) -> Result<EncryptedMessage, CryptoError> {
    let content_key = ContentKey::generate()?;
    let nonce = MessageNonce::generate()?;

    let encrypted_data = content_key.encrypt(&nonce, message.as_bytes())?;
    let wrapped_key = recipient.wrap(content_key.export())?;

    tracing::trace!(
        ciphertext_len = encrypted_data.len(),
        "sealed message for recipient"
    );

    Ok(EncryptedMessage {
        encrypted_data,
        encrypted_key_package: to_base64(&wrapped_key),
        nonce: to_base64(nonce.bytes()),
    })
}

/// Decrypt a message using the private key in `private_key_jwk`
///
/// # Errors
///
/// Returns an error if:
/// - The JWK cannot be imported as a decryption key
/// - Either base64 field is malformed
/// - The key package was not wrapped for this key, or is corrupted
/// - The nonce or recovered content key has the wrong length
/// - Authentication fails (tampered ciphertext, wrong nonce)
/// - The plaintext is not UTF-8
pub fn decrypt_message_with(
    private_key_jwk: &str,
    encrypted_data: &[u8],
    encrypted_key_package: &str,
    nonce: &str,
) -> Result<String, CryptoError> {
    let private_key = DecryptionKey::from_jwk(private_key_jwk)?;
    decrypt_message_for(&private_key, encrypted_data, encrypted_key_package, nonce)
}

/// Decrypt a message with an already imported private key
pub fn decrypt_message_for(
    private_key: &DecryptionKey,
    encrypted_data: &[u8],
    encrypted_key_package: &str,
    nonce: &str,
) -> Result<String, CryptoError> {
    let wrapped_key = from_base64(encrypted_key_package)?;
    let raw_key = Zeroizing::new(private_key.unwrap(&wrapped_key)?);
    let content_key = ContentKey::from_slice(&raw_key)?;

    let nonce = MessageNonce::from_slice(&from_base64(nonce)?)?;
    let plaintext = content_key.decrypt(&nonce, encrypted_data)?;

    tracing::trace!(plaintext_len = plaintext.len(), "opened message");
    // Strict decode, no U+FFFD substitution
    Ok(String::from_utf8(plaintext)?)
}
