use std::path::PathBuf;

use clap::Args;

use common::envelope::EncryptedMessage;
use common::error::MessagingError;
use common::key_store::FileKeyStoreError;
use sealpost::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Decrypt {
    /// File holding the envelope JSON (read from stdin if omitted)
    #[arg(long)]
    pub envelope: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("failed to read envelope: {0}")]
    Read(std::io::Error),
    #[error("invalid envelope: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}. Run 'sealpost keys generate' first")]
    SetupRequired(MessagingError<FileKeyStoreError>),
    #[error("decryption failed: {0}")]
    Messaging(MessagingError<FileKeyStoreError>),
}

impl From<MessagingError<FileKeyStoreError>> for DecryptError {
    fn from(e: MessagingError<FileKeyStoreError>) -> Self {
        if e.is_setup_required() {
            DecryptError::SetupRequired(e)
        } else {
            DecryptError::Messaging(e)
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Decrypt {
    type Error = DecryptError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;

        let json = match &self.envelope {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(DecryptError::Read)?,
            None => super::read_input(tokio::io::stdin())
                .await
                .map_err(DecryptError::Read)?,
        };
        let envelope: EncryptedMessage = serde_json::from_str(&json)?;

        let keys = state.messaging_keys()?;
        Ok(keys.open(&envelope)?)
    }
}
