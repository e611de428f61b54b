use clap::Args;

use common::error::MessagingError;
use common::key_store::FileKeyStoreError;
use sealpost::state::StateError;

/// Remove the stored key pair. Messages already received become unreadable.
#[derive(Args, Debug, Clone)]
pub struct Clear;

#[derive(Debug, thiserror::Error)]
pub enum ClearError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("{0}")]
    Messaging(#[from] MessagingError<FileKeyStoreError>),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Clear {
    type Error = ClearError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let keys = ctx.state()?.messaging_keys()?;
        keys.clear_keys()?;
        tracing::info!("cleared messaging keys");

        Ok("Cleared messaging keys".to_string())
    }
}
