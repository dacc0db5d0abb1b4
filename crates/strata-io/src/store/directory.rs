// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::StoreError;
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use strata_core::io::{PersistedStore, StoredResource};

/// A persisted store keeping one JSON document per key in a directory.
///
/// Each file holds `{"file": <display name>, "data": <base64 payload>}`.
/// Keys are arbitrary strings, so file names are the URL-safe base64 of the key.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The directory entries are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persists `bytes` under `key`, replacing any previous entry.
    pub fn put(&self, key: &str, display_name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let entry = StoredResource {
            display_name: display_name.to_string(),
            payload: STANDARD.encode(bytes),
        };
        let json = serde_json::to_vec(&entry)?;
        let path = self.entry_path(key);
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
    }

    /// Deletes the entry stored under `key`. Deleting a missing entry succeeds.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.json", URL_SAFE_NO_PAD.encode(key.as_bytes())))
    }
}

impl PersistedStore for DirectoryStore {
    fn get(&self, key: &str) -> Option<StoredResource> {
        let path = self.entry_path(key);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Failed to read store entry {:?}: {}", path, e);
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Ignoring malformed store entry {:?}: {}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_put_then_get() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();

        store.put("maps/heights.raw", "heights.raw", &[1, 2, 3]).unwrap();
        let entry = store.get("maps/heights.raw").unwrap();

        assert_eq!(entry.display_name, "heights.raw");
        assert_eq!(STANDARD.decode(entry.payload).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_and_malformed_entries_read_as_absent() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::open(dir.path().join("nested")).unwrap();
        assert!(store.get("nothing").is_none());

        fs::write(store.entry_path("broken"), b"{ not json").unwrap();
        assert!(store.get("broken").is_none());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();
        store.put("k", "k", b"v").unwrap();

        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert!(store.get("k").is_none());
    }
}
