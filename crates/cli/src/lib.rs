// App state (configuration, paths, key store location)
pub mod state;

pub use state::{AppConfig, AppState, StateError};
