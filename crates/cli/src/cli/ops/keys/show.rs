use clap::Args;

use common::error::MessagingError;
use common::key_store::FileKeyStoreError;
use sealpost::state::StateError;

/// Print the stored public key JWK, ready to publish
#[derive(Args, Debug, Clone)]
pub struct Show;

#[derive(Debug, thiserror::Error)]
pub enum ShowError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("no public key found. Run 'sealpost keys generate' first")]
    NoPublicKey,
    #[error("{0}")]
    Messaging(#[from] MessagingError<FileKeyStoreError>),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Show {
    type Error = ShowError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let keys = ctx.state()?.messaging_keys()?;
        keys.stored_public_key()?.ok_or(ShowError::NoPublicKey)
    }
}
