//! Shared test utilities for messaging integration tests
#![allow(dead_code)]

use std::sync::OnceLock;

use common::crypto::KeyPair;
use common::key_store::{FileKeyStore, MemoryKeyStore};
use common::messaging::MessagingKeys;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Route library logs through the test harness, filtered by RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Identity of the sending user. Generated once per test binary.
pub fn sender() -> &'static KeyPair {
    static SENDER: OnceLock<KeyPair> = OnceLock::new();
    SENDER.get_or_init(|| KeyPair::generate().unwrap())
}

/// Identity of the receiving user. Generated once per test binary.
pub fn recipient() -> &'static KeyPair {
    static RECIPIENT: OnceLock<KeyPair> = OnceLock::new();
    RECIPIENT.get_or_init(|| KeyPair::generate().unwrap())
}

/// A memory-backed identity holding the recipient's keys
pub fn recipient_device() -> MessagingKeys<MemoryKeyStore> {
    let keys = MessagingKeys::new(MemoryKeyStore::new());
    keys.save_key_pair(recipient()).unwrap();
    keys
}

/// A file-backed identity in a fresh temporary directory
pub fn file_device() -> (MessagingKeys<FileKeyStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileKeyStore::open(temp_dir.path().join("keys")).unwrap();
    (MessagingKeys::new(store), temp_dir)
}
