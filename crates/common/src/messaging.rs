use crate::crypto::{decrypt_message_with, KeyPair};
use crate::envelope::EncryptedMessage;
use crate::error::MessagingError;
use crate::key_store::KeyStore;

/// Store entry holding the private identity key JWK
pub const PRIVATE_KEY_STORAGE_KEY: &str = "messaging_private_key";
/// Store entry holding the public identity key JWK
pub const PUBLIC_KEY_STORAGE_KEY: &str = "messaging_public_key";

/// The local user's messaging identity, persisted in a [`KeyStore`]
///
/// Wraps a store with the helpers the messaging UI needs: saving a freshly
/// generated keypair, checking whether setup has happened, clearing keys on
/// logout, and decrypting incoming messages with the stored private key.
///
/// # Examples
///
/// ```ignore
/// let keys = MessagingKeys::new(MemoryKeyStore::new());
/// let public_jwk = keys.ensure_keys()?;
/// // publish `public_jwk` through the API layer ...
///
/// let text = keys.decrypt_message(&data, &key_package, &nonce)?;
/// ```
#[derive(Debug, Clone)]
pub struct MessagingKeys<S> {
    store: S,
}

impl<S: KeyStore> MessagingKeys<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist both halves of an identity keypair
    ///
    /// The private key is written first. If the second write fails the store
    /// is left half set up, which [`has_keys`](Self::has_keys) reports as not
    /// set up.
    pub fn save_keys(
        &self,
        public_key_jwk: &str,
        private_key_jwk: &str,
    ) -> Result<(), MessagingError<S::Error>> {
        self.store
            .set(PRIVATE_KEY_STORAGE_KEY, private_key_jwk)
            .map_err(MessagingError::Storage)?;
        self.store
            .set(PUBLIC_KEY_STORAGE_KEY, public_key_jwk)
            .map_err(MessagingError::Storage)?;

        tracing::debug!("saved messaging keys");
        Ok(())
    }

    /// Persist a [`KeyPair`]
    pub fn save_key_pair(&self, pair: &KeyPair) -> Result<(), MessagingError<S::Error>> {
        self.save_keys(&pair.public_key_jwk, &pair.private_key_jwk)
    }

    /// The stored private key JWK, if any
    pub fn stored_private_key(&self) -> Result<Option<String>, MessagingError<S::Error>> {
        self.store
            .get(PRIVATE_KEY_STORAGE_KEY)
            .map_err(MessagingError::Storage)
    }

    /// The stored public key JWK, if any
    pub fn stored_public_key(&self) -> Result<Option<String>, MessagingError<S::Error>> {
        self.store
            .get(PUBLIC_KEY_STORAGE_KEY)
            .map_err(MessagingError::Storage)
    }

    /// True only when both halves are stored
    pub fn has_keys(&self) -> Result<bool, MessagingError<S::Error>> {
        Ok(self.stored_private_key()?.is_some() && self.stored_public_key()?.is_some())
    }

    /// Remove both halves from the store
    pub fn clear_keys(&self) -> Result<(), MessagingError<S::Error>> {
        self.store
            .remove(PRIVATE_KEY_STORAGE_KEY)
            .map_err(MessagingError::Storage)?;
        self.store
            .remove(PUBLIC_KEY_STORAGE_KEY)
            .map_err(MessagingError::Storage)?;

        tracing::debug!("cleared messaging keys");
        Ok(())
    }

    /// Return the stored public key, generating and saving a keypair first
    /// if the store is not fully set up
    ///
    /// A half set up store is overwritten with a new identity.
    pub fn ensure_keys(&self) -> Result<String, MessagingError<S::Error>> {
        if let (Some(_), Some(public)) = (self.stored_private_key()?, self.stored_public_key()?) {
            return Ok(public);
        }

        let pair = KeyPair::generate()?;
        self.save_key_pair(&pair)?;
        Ok(pair.public_key_jwk)
    }

    /// Decrypt a message addressed to the local identity
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::NoPrivateKey`] if no private key is stored,
    /// [`MessagingError::Storage`] if the store fails, and
    /// [`MessagingError::Crypto`] for every cryptographic failure.
    pub fn decrypt_message(
        &self,
        encrypted_data: &[u8],
        encrypted_key_package: &str,
        nonce: &str,
    ) -> Result<String, MessagingError<S::Error>> {
        let private_key_jwk = self
            .stored_private_key()?
            .ok_or(MessagingError::NoPrivateKey)?;

        Ok(decrypt_message_with(
            &private_key_jwk,
            encrypted_data,
            encrypted_key_package,
            nonce,
        )?)
    }

    /// Decrypt an [`EncryptedMessage`] addressed to the local identity
    pub fn open(&self, message: &EncryptedMessage) -> Result<String, MessagingError<S::Error>> {
        self.decrypt_message(
            &message.encrypted_data,
            &message.encrypted_key_package,
            &message.nonce,
        )
    }
}
