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

//! A generic, type-safe storage for decoded asset handles.

use std::collections::HashMap;
use strata_core::asset::{Asset, AssetHandle, ResourceReference};

/// An in-memory map from raw reference to the decoded asset `A`.
///
/// A reference maps to at most one handle, so any given encoding is decoded
/// only once. Subsequent requests receive a clone of the stored handle.
pub struct Assets<A: Asset> {
    storage: HashMap<ResourceReference, AssetHandle<A>>,
}

impl<A: Asset> Default for Assets<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Asset> Clone for Assets<A> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<A: Asset> Assets<A> {
    /// Creates a new, empty asset storage.
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Inserts a handle for `reference`, returning the one it replaced.
    pub fn insert(
        &mut self,
        reference: ResourceReference,
        handle: AssetHandle<A>,
    ) -> Option<AssetHandle<A>> {
        self.storage.insert(reference, handle)
    }

    /// Retrieves the handle stored for `reference`.
    pub fn get(&self, reference: &str) -> Option<&AssetHandle<A>> {
        self.storage.get(reference)
    }

    /// Checks if a decoded asset is stored for `reference`.
    pub fn contains(&self, reference: &str) -> bool {
        self.storage.contains_key(reference)
    }

    /// Drops the storage's handle for `reference`.
    ///
    /// Holders of clones keep the asset alive.
    pub fn remove(&mut self, reference: &str) -> Option<AssetHandle<A>> {
        self.storage.remove(reference)
    }

    /// Number of stored assets.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}
