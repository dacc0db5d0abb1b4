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

//! Contracts for the two sources raw bytes can come from.
//!
//! Neither contract has an error channel on its read path: a missing entry, an
//! I/O failure and an HTTP error all surface as `None`, so every caller branches
//! on presence alone.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The stored representation of a resource in a [`PersistedStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResource {
    /// Human-readable name of the stored file, used for logging.
    #[serde(rename = "file")]
    pub display_name: String,
    /// The raw bytes, base64-encoded.
    #[serde(rename = "data")]
    pub payload: String,
}

/// A local key/value store holding previously persisted resources.
pub trait PersistedStore: Send + Sync {
    /// Returns the stored entry for `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Option<StoredResource>;
}

/// A binary network transport.
#[async_trait]
pub trait NetworkFetcher: Send + Sync {
    /// Fetches `url` as raw bytes, resolving `None` on any failure.
    async fn get(&self, url: &str) -> Option<Bytes>;
}

/// Where a fetched payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Read from the local persisted store.
    Persisted,
    /// Downloaded through the network fetcher.
    Network,
}

/// Raw bytes resolved for a reference, tagged with their provenance.
#[derive(Debug, Clone)]
pub struct FetchedBytes {
    /// The undecoded payload.
    pub bytes: Bytes,
    /// The source that produced the payload.
    pub provenance: Provenance,
}
