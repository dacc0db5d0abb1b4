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

use super::Asset;
use std::{fmt, ops::Deref, sync::Arc};

/// A thread-safe, reference-counted handle to a decoded asset.
///
/// Cloning a handle only increments the reference count. Every caller that
/// waited on the same load receives a clone of the same handle, which can be
/// checked with [`AssetHandle::ptr_eq`].
pub struct AssetHandle<T: Asset>(Arc<T>);

impl<T: Asset> AssetHandle<T> {
    /// Creates a new `AssetHandle` that takes ownership of the asset data.
    pub fn new(asset: T) -> Self {
        Self(Arc::new(asset))
    }

    /// Returns `true` if both handles point to the same decoded asset.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }

    /// Number of live handles to this asset, the cache's included.
    pub fn holders(this: &Self) -> usize {
        Arc::strong_count(&this.0)
    }
}

impl<T: Asset> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Asset> Deref for AssetHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Asset + fmt::Debug> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetHandle").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blob(u32);
    impl Asset for Blob {}

    #[test]
    fn test_clones_share_the_asset() {
        let handle = AssetHandle::new(Blob(7));
        let other = handle.clone();

        assert!(AssetHandle::ptr_eq(&handle, &other));
        assert_eq!(other.0.0, 7);
        assert_eq!(AssetHandle::holders(&handle), 2);
    }

    #[test]
    fn test_distinct_assets_are_not_equal() {
        let a = AssetHandle::new(Blob(1));
        let b = AssetHandle::new(Blob(1));
        assert!(!AssetHandle::ptr_eq(&a, &b));
    }
}
