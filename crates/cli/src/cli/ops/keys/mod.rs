use clap::{Args, Subcommand};

pub mod clear;
pub mod generate;
pub mod show;
pub mod status;

use crate::cli::op::Op;

crate::command_enum! {
    (Generate, generate::Generate),
    (Show, show::Show),
    (Status, status::Status),
    (Clear, clear::Clear),
}

// Rename the generated Command to KeysCommand for clarity
pub type KeysCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Keys {
    #[command(subcommand)]
    pub command: KeysCommand,
}

#[async_trait::async_trait]
impl Op for Keys {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
