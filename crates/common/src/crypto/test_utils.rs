//! Shared keypairs for unit tests. RSA generation is slow, so each identity is
//! generated once per test binary.

use std::sync::OnceLock;

use super::KeyPair;

pub(crate) fn alice() -> &'static KeyPair {
    static ALICE: OnceLock<KeyPair> = OnceLock::new();
    ALICE.get_or_init(|| KeyPair::generate().unwrap())
}

pub(crate) fn bob() -> &'static KeyPair {
    static BOB: OnceLock<KeyPair> = OnceLock::new();
    BOB.get_or_init(|| KeyPair::generate().unwrap())
}
