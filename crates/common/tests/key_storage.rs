//! Integration tests for persisting the local messaging identity

mod common;

use ::common::crypto::{encrypt_message, KeyPair};
use ::common::key_store::{FileKeyStore, KeyStore, MemoryKeyStore};
use ::common::messaging::{MessagingKeys, PRIVATE_KEY_STORAGE_KEY, PUBLIC_KEY_STORAGE_KEY};

#[test]
fn test_storage_roundtrip() {
    let keys = MessagingKeys::new(MemoryKeyStore::new());
    assert!(!keys.has_keys().unwrap());

    keys.save_keys("pub-jwk", "priv-jwk").unwrap();
    assert_eq!(keys.stored_public_key().unwrap().as_deref(), Some("pub-jwk"));
    assert_eq!(keys.stored_private_key().unwrap().as_deref(), Some("priv-jwk"));
    assert!(keys.has_keys().unwrap());

    keys.clear_keys().unwrap();
    assert!(!keys.has_keys().unwrap());
    assert_eq!(keys.stored_public_key().unwrap(), None);
    assert_eq!(keys.stored_private_key().unwrap(), None);
}

#[test]
fn test_keys_live_under_fixed_names() {
    let store = MemoryKeyStore::new();
    let keys = MessagingKeys::new(store.clone());
    keys.save_keys("pub-jwk", "priv-jwk").unwrap();

    assert_eq!(
        store.get("messaging_public_key").unwrap().as_deref(),
        Some("pub-jwk")
    );
    assert_eq!(
        store.get("messaging_private_key").unwrap().as_deref(),
        Some("priv-jwk")
    );
    assert_eq!(PUBLIC_KEY_STORAGE_KEY, "messaging_public_key");
    assert_eq!(PRIVATE_KEY_STORAGE_KEY, "messaging_private_key");
}

#[test]
fn test_file_store_persists_identity_across_instances() {
    let (device, temp_dir) = common::file_device();
    device.save_key_pair(common::recipient()).unwrap();

    let reopened = MessagingKeys::new(FileKeyStore::open(temp_dir.path().join("keys")).unwrap());
    assert!(reopened.has_keys().unwrap());

    let sealed = encrypt_message("after restart", &common::recipient().public_key_jwk).unwrap();
    assert_eq!(reopened.open(&sealed).unwrap(), "after restart");

    reopened.clear_keys().unwrap();
    assert!(!device.has_keys().unwrap());
}

#[test]
fn test_ensure_keys_generates_once() {
    common::init_tracing();
    let (device, _temp_dir) = common::file_device();

    let public = device.ensure_keys().unwrap();
    assert!(device.has_keys().unwrap());
    assert_eq!(device.ensure_keys().unwrap(), public);

    let sealed = encrypt_message("first contact", &public).unwrap();
    assert_eq!(device.open(&sealed).unwrap(), "first contact");
}

#[tokio::test]
async fn test_async_generation_then_store() {
    let pair = KeyPair::generate_async().await.unwrap();
    let keys = MessagingKeys::new(MemoryKeyStore::new());
    keys.save_key_pair(&pair).unwrap();

    let sealed = encrypt_message("async", &pair.public_key_jwk).unwrap();
    assert_eq!(keys.open(&sealed).unwrap(), "async");
}
