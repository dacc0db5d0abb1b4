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

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use strata_core::io::{PersistedStore, StoredResource};

/// A process-local persisted store, backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredResource>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists `bytes` under `key`.
    pub fn insert(&self, key: impl Into<String>, display_name: impl Into<String>, bytes: &[u8]) {
        self.insert_raw(
            key,
            StoredResource {
                display_name: display_name.into(),
                payload: STANDARD.encode(bytes),
            },
        );
    }

    /// Stores an already-encoded entry as is.
    pub fn insert_raw(&self, key: impl Into<String>, entry: StoredResource) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), entry);
    }

    /// Drops the entry stored under `key`.
    pub fn remove(&self, key: &str) -> Option<StoredResource> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistedStore for MemoryStore {
    fn get(&self, key: &str) -> Option<StoredResource> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}
