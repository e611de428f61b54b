/**
 * Cryptographic types and operations.
 *  - RSA-OAEP identity keys and their JWK form
 *  - Per-message AES-GCM content keys
 *  - Hybrid encrypt / decrypt of message text
 */
pub mod crypto;
/**
 * The three-field envelope a sender hands
 *  to the transport layer.
 */
pub mod envelope;
/**
 * Error types shared by the crypto engine
 *  and the key persistence layer.
 */
pub mod error;
/**
 * Local key-value persistence for key material.
 *  A trait plus in-memory and on-disk backends.
 */
pub mod key_store;
/**
 * Ties the crypto engine to a key store: saving,
 *  loading and clearing the local identity, and
 *  decrypting with whatever key is stored.
 */
pub mod messaging;

pub mod prelude {
    pub use crate::crypto::{
        decrypt_message_with, encrypt_message, generate_key_pair, DecryptionKey, EncryptionKey,
        KeyPair,
    };
    pub use crate::envelope::EncryptedMessage;
    pub use crate::error::{CryptoError, MessagingError};
    pub use crate::key_store::{FileKeyStore, KeyStore, MemoryKeyStore};
    pub use crate::messaging::MessagingKeys;
}
