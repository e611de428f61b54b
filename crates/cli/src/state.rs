use std::fs;
use std::path::{Path, PathBuf};

use common::key_store::{FileKeyStore, FileKeyStoreError};
use common::messaging::MessagingKeys;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "sealpost";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const KEYS_DIR_NAME: &str = "keys";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level used when neither `--log-level` nor `RUST_LOG` is set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for key material (defaults to `<state dir>/keys`).
    /// Relative paths resolve against the state directory.
    #[serde(default)]
    pub keys_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            keys_dir: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the state directory (~/.sealpost)
    pub state_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Path to the key store directory
    pub keys_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the state directory path (custom or default ~/.sealpost)
    pub fn state_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    fn keys_path(state_dir: &Path, config: &AppConfig) -> PathBuf {
        match &config.keys_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => state_dir.join(dir),
            None => state_dir.join(KEYS_DIR_NAME),
        }
    }

    /// Initialize a new state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let state_dir = Self::state_dir(custom_path)?;

        if state_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&state_dir)?;

        // Create config (use provided or default)
        let config = config.unwrap_or_default();
        let config_path = state_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        // Key store directory starts out empty
        let keys_path = Self::keys_path(&state_dir, &config);
        FileKeyStore::open(&keys_path)?;

        tracing::info!("initialized state directory at {}", state_dir.display());

        Ok(Self {
            state_dir,
            config_path,
            keys_path,
            config,
        })
    }

    /// Load existing state from the state directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let state_dir = Self::state_dir(custom_path)?;

        if !state_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = state_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;
        let keys_path = Self::keys_path(&state_dir, &config);

        Ok(Self {
            state_dir,
            config_path,
            keys_path,
            config,
        })
    }

    /// Open the on-disk key store
    pub fn key_store(&self) -> Result<FileKeyStore, StateError> {
        Ok(FileKeyStore::open(&self.keys_path)?)
    }

    /// The local messaging identity backed by the on-disk key store
    pub fn messaging_keys(&self) -> Result<MessagingKeys<FileKeyStore>, StateError> {
        Ok(MessagingKeys::new(self.key_store()?))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("sealpost directory not initialized. Run 'sealpost init' first")]
    NotInitialized,

    #[error("sealpost directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("key store error: {0}")]
    KeyStore(#[from] FileKeyStoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
