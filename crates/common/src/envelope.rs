use serde::{Deserialize, Serialize};
use serde_with::base64::Base64;
use serde_with::serde_as;

use crate::crypto::{decrypt_message_for, decrypt_message_with, DecryptionKey};
use crate::error::CryptoError;

/// Everything a recipient needs to read one message
///
/// The three fields are only meaningful together: losing any of them makes
/// the message unreadable, so the transport layer should ship them as one
/// unit.
///
/// # Wire Format
///
/// In JSON (and any other human-readable serde format) the ciphertext is
/// base64 encoded alongside the two fields that already are:
///
/// ```text
/// {
///   "encryptedData": "<base64 AES-GCM ciphertext || tag>",
///   "encryptedKeyPackage": "<base64 RSA-OAEP wrapped content key>",
///   "nonce": "<base64 12-byte nonce>"
/// }
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedMessage {
    /// AES-256-GCM ciphertext with the tag appended
    #[serde_as(as = "Base64")]
    pub encrypted_data: Vec<u8>,
    /// Base64 of the content key wrapped for the recipient
    pub encrypted_key_package: String,
    /// Base64 of the nonce
    pub nonce: String,
}

impl EncryptedMessage {
    /// Decrypt with a private key JWK
    pub fn decrypt_with(&self, private_key_jwk: &str) -> Result<String, CryptoError> {
        decrypt_message_with(
            private_key_jwk,
            &self.encrypted_data,
            &self.encrypted_key_package,
            &self.nonce,
        )
    }

    /// Decrypt with an imported private key
    pub fn decrypt_for(&self, private_key: &DecryptionKey) -> Result<String, CryptoError> {
        decrypt_message_for(
            private_key,
            &self.encrypted_data,
            &self.encrypted_key_package,
            &self.nonce,
        )
    }
}
