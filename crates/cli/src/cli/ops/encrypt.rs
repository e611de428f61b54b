use std::path::PathBuf;

use clap::Args;

use common::crypto::encrypt_message;
use common::error::CryptoError;

#[derive(Args, Debug, Clone)]
pub struct Encrypt {
    /// File holding the recipient's public key JWK
    #[arg(long)]
    pub recipient: PathBuf,

    /// Message text (read from stdin if omitted)
    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum EncryptError {
    #[error("failed to read {0}: {1}")]
    ReadRecipient(PathBuf, std::io::Error),
    #[error("failed to read message from stdin: {0}")]
    ReadStdin(std::io::Error),
    #[error("encryption failed: {0}")]
    Crypto(#[from] CryptoError),
    #[error("failed to serialize envelope: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Encrypt {
    type Error = EncryptError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let recipient_jwk = tokio::fs::read_to_string(&self.recipient)
            .await
            .map_err(|e| EncryptError::ReadRecipient(self.recipient.clone(), e))?;

        let message = match &self.message {
            Some(message) => message.clone(),
            None => super::read_input(tokio::io::stdin())
                .await
                .map_err(EncryptError::ReadStdin)?,
        };

        let envelope = encrypt_message(&message, recipient_jwk.trim())?;
        tracing::info!(
            ciphertext_len = envelope.encrypted_data.len(),
            "encrypted message"
        );

        Ok(serde_json::to_string_pretty(&envelope)?)
    }
}
