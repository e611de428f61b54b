use clap::Args;

use common::crypto::KeyPair;
use common::error::{CryptoError, MessagingError};
use common::key_store::FileKeyStoreError;
use sealpost::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Generate {
    /// Replace an existing key pair. Messages sent to the old public key
    /// become unreadable.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("messaging keys already exist. Use --force to replace them")]
    AlreadyExists,
    #[error("key generation failed: {0}")]
    Crypto(#[from] CryptoError),
    #[error("{0}")]
    Messaging(#[from] MessagingError<FileKeyStoreError>),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Generate {
    type Error = GenerateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;
        let keys = state.messaging_keys()?;

        if keys.has_keys()? && !self.force {
            return Err(GenerateError::AlreadyExists);
        }

        let pair = KeyPair::generate_async().await?;
        keys.save_key_pair(&pair)?;
        tracing::info!(path = %state.keys_path.display(), "generated messaging keys");

        Ok(format!(
            "Generated messaging keys in {}\nPublic key:\n{}",
            state.keys_path.display(),
            pair.public_key_jwk
        ))
    }
}
