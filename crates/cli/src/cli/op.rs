use std::error::Error;
use std::path::PathBuf;

use sealpost::state::{AppState, StateError};

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::WARN;

/// Resolve the log level for the subscriber.
///
/// Priority: explicit `--log-level` flag > config file `log_level` > warn.
/// Unparseable values fall through to the next source.
pub fn resolve_log_level(explicit: Option<&str>, config_path: Option<PathBuf>) -> tracing::Level {
    if let Some(level) = explicit.and_then(|l| l.parse().ok()) {
        return level;
    }
    if let Ok(state) = AppState::load(config_path) {
        if let Ok(level) = state.config.log_level.parse() {
            return level;
        }
    }
    DEFAULT_LOG_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealpost::state::AppConfig;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_log_level_explicit_wins() {
        let result = resolve_log_level(Some("debug"), None);
        assert_eq!(result, tracing::Level::DEBUG);
    }

    #[test]
    fn test_resolve_log_level_falls_back_to_default() {
        // No explicit level, no valid config path → warn
        let result = resolve_log_level(None, Some(PathBuf::from("/nonexistent")));
        assert_eq!(result, tracing::Level::WARN);

        let result = resolve_log_level(Some("loud"), Some(PathBuf::from("/nonexistent")));
        assert_eq!(result, tracing::Level::WARN);
    }

    #[test]
    fn test_resolve_log_level_reads_config() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("state");
        let config = AppConfig {
            log_level: "trace".to_string(),
            ..AppConfig::default()
        };
        AppState::init(Some(dir.clone()), Some(config)).unwrap();

        assert_eq!(
            resolve_log_level(None, Some(dir.clone())),
            tracing::Level::TRACE
        );
        assert_eq!(
            resolve_log_level(Some("error"), Some(dir)),
            tracing::Level::ERROR
        );
    }
}

#[derive(Clone, Debug)]
pub struct OpContext {
    /// Optional custom state directory (defaults to ~/.sealpost)
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Load the initialized state directory
    pub fn state(&self) -> Result<AppState, StateError> {
        AppState::load(self.config_path.clone())
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
