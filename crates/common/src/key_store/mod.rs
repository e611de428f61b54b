mod file;
mod memory;
mod provider;

pub use file::{FileKeyStore, FileKeyStoreError};
pub use memory::{MemoryKeyStore, MemoryKeyStoreError};
pub use provider::KeyStore;
