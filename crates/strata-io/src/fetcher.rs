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
use bytes::Bytes;
use std::sync::Arc;
use strata_core::{
    asset::ResourceReference,
    io::{FetchedBytes, NetworkFetcher, PersistedStore, Provenance},
};

/// Resolves a reference to raw bytes, persisted store first, network second.
///
/// Fetching never fails: every failure (missing entry, corrupt entry, HTTP
/// error) ends in `None`, so callers branch on presence alone.
pub struct ResourceFetcher {
    store: Arc<dyn PersistedStore>,
    network: Arc<dyn NetworkFetcher>,
    resource_folder: String,
}

impl ResourceFetcher {
    /// Creates a fetcher reading from `store` and falling back to `network`.
    pub fn new(store: Arc<dyn PersistedStore>, network: Arc<dyn NetworkFetcher>) -> Self {
        Self {
            store,
            network,
            resource_folder: String::new(),
        }
    }

    /// Sets the prefix prepended to references for network fetches.
    pub fn with_resource_folder(mut self, folder: impl Into<String>) -> Self {
        self.set_resource_folder(folder);
        self
    }

    /// Sets the prefix prepended to references for network fetches.
    pub fn set_resource_folder(&mut self, folder: impl Into<String>) {
        self.resource_folder = folder.into();
    }

    /// The prefix prepended to references for network fetches.
    pub fn resource_folder(&self) -> &str {
        &self.resource_folder
    }

    /// Resolves the bytes behind `reference`.
    ///
    /// A persisted-store hit is never resolved within the polling turn that
    /// issued the call: the future yields to the scheduler once before the
    /// stored payload is decoded.
    pub async fn fetch(&self, reference: &ResourceReference) -> Option<FetchedBytes> {
        if let Some(stored) = self.store.get(reference.as_str()) {
            tokio::task::yield_now().await;

            match STANDARD.decode(stored.payload.as_bytes()) {
                Ok(bytes) => {
                    log::info!("Loading local data: {}", stored.display_name);
                    return Some(FetchedBytes {
                        bytes: Bytes::from(bytes),
                        provenance: Provenance::Persisted,
                    });
                }
                Err(e) => {
                    log::warn!(
                        "Persisted entry for '{}' is not valid base64 ({}), fetching from network",
                        reference,
                        e
                    );
                }
            }
        }

        let url = format!("{}{}", self.resource_folder, reference);
        log::debug!("Fetching '{}'", url);
        let bytes = self.network.get(&url).await?;
        Some(FetchedBytes {
            bytes,
            provenance: Provenance::Network,
        })
    }
}
