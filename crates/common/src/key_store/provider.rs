use std::error::Error;
use std::fmt::Debug;

/// Local, per-device string storage for key material
///
/// Any store that keeps strings under fixed names will do, for example a
/// directory of files or an OS keychain. Calls are synchronous and no retries
/// are added on top: whatever the backend returns is surfaced to the caller.
///
/// Writes are last-writer-wins. Implementations need not coordinate
/// concurrent writers.
pub trait KeyStore: Send + Sync + Debug {
    type Error: Error + Send + Sync + 'static;

    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - The stored value
    /// * `Ok(None)` - Nothing is stored under `key`
    /// * `Err(Self::Error)` - The backend failed
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove the value under `key`
    ///
    /// Removing a key that does not exist is not an error.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}
