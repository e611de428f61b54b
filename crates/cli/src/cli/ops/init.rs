use std::path::PathBuf;

use clap::Args;

use sealpost::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Default log level written to config.toml
    #[arg(long, default_value = "warn")]
    pub default_log_level: String,

    /// Directory for key material (defaults to <state dir>/keys)
    #[arg(long)]
    pub keys_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] sealpost::state::StateError),
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        if self.default_log_level.parse::<tracing::Level>().is_err() {
            return Err(InitError::InvalidLogLevel(self.default_log_level.clone()));
        }

        let config = AppConfig {
            log_level: self.default_log_level.to_lowercase(),
            keys_dir: self.keys_dir.clone(),
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized sealpost directory at: {}\n\
             - Config: {}\n\
             - Keys: {}\n\
             - Log level: {}\n\
             Run 'sealpost keys generate' to create your messaging keys",
            state.state_dir.display(),
            state.config_path.display(),
            state.keys_path.display(),
            state.config.log_level,
        );

        Ok(output)
    }
}
