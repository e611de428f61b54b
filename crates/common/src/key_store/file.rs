use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::provider::KeyStore;

/// Key store that keeps one file per entry in a directory
///
/// Entries are written to a temporary sibling and renamed into place, so a
/// reader sees either the old value or the new one. On unix the files are
/// created with mode `0600`. Deleting a file is all `remove` does; there is no
/// secure wipe.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    root: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum FileKeyStoreError {
    #[error("invalid key store entry name: {0:?}")]
    InvalidName(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FileKeyStore {
    /// Use `root` as the store directory, creating it if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, FileKeyStoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding the entries
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an entry name onto a file inside the store directory
    ///
    /// Names are restricted to `[A-Za-z0-9_-]` so they can never escape the
    /// directory or collide with the temporary files used while writing.
    fn entry_path(&self, key: &str) -> Result<PathBuf, FileKeyStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FileKeyStoreError::InvalidName(key.to_string()));
        }
        Ok(self.root.join(key))
    }

    fn write_private(path: &Path, value: &str) -> io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()
    }
}

impl KeyStore for FileKeyStore {
    type Error = FileKeyStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let path = self.entry_path(key)?;
        let tmp = self.root.join(format!(".{}.tmp", key));

        if let Err(e) = Self::write_private(&tmp, value).and_then(|()| fs::rename(&tmp, &path)) {
            // The temp file may hold key material
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::trace!(entry = key, "wrote key store entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyStore::open(temp.path().join("keys")).unwrap();

        assert_eq!(store.get("entry").unwrap(), None);
        store.set("entry", "{\"kty\":\"RSA\"}").unwrap();
        assert_eq!(
            store.get("entry").unwrap().as_deref(),
            Some("{\"kty\":\"RSA\"}")
        );

        store.remove("entry").unwrap();
        assert_eq!(store.get("entry").unwrap(), None);
        // Second remove is a no-op
        store.remove("entry").unwrap();
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyStore::open(temp.path()).unwrap();

        store.set("entry", "first").unwrap();
        store.set("entry", "second").unwrap();
        assert_eq!(store.get("entry").unwrap().as_deref(), Some("second"));

        let names: Vec<_> = fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["entry".to_string()]);
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp = TempDir::new().unwrap();
        FileKeyStore::open(temp.path())
            .unwrap()
            .set("entry", "persisted")
            .unwrap();

        let reopened = FileKeyStore::open(temp.path()).unwrap();
        assert_eq!(reopened.get("entry").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_rejects_path_like_names() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyStore::open(temp.path()).unwrap();

        for name in ["", "../escape", "a/b", ".hidden", "with space"] {
            assert!(matches!(
                store.set(name, "x"),
                Err(FileKeyStoreError::InvalidName(_))
            ));
            assert!(store.get(name).is_err());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyStore::open(temp.path()).unwrap();

        // A directory in the entry's place makes the rename fail
        fs::create_dir(temp.path().join("entry")).unwrap();
        fs::write(temp.path().join("entry").join("child"), "x").unwrap();

        assert!(matches!(
            store.set("entry", "secret"),
            Err(FileKeyStoreError::Io(_))
        ));
        assert!(!temp.path().join(".entry.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_entries_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let store = FileKeyStore::open(temp.path()).unwrap();
        store.set("entry", "secret").unwrap();

        let mode = fs::metadata(temp.path().join("entry"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
