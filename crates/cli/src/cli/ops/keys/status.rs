use clap::Args;

use common::error::MessagingError;
use common::key_store::FileKeyStoreError;
use sealpost::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Status;

#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("{0}")]
    Messaging(#[from] MessagingError<FileKeyStoreError>),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Status {
    type Error = StatusError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;
        let keys = state.messaging_keys()?;

        let private = keys.stored_private_key()?.is_some();
        let public = keys.stored_public_key()?.is_some();

        let summary = match (private, public) {
            (true, true) => "set up",
            (false, false) => "not set up. Run 'sealpost keys generate'",
            // Interrupted save or manual edits
            _ => "incomplete. Run 'sealpost keys generate --force'",
        };

        Ok(format!(
            "Messaging keys: {}\n\
             - Directory: {}\n\
             - Private key: {}\n\
             - Public key: {}",
            summary,
            state.keys_path.display(),
            if private { "present" } else { "missing" },
            if public { "present" } else { "missing" },
        ))
    }
}
