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

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use strata_core::io::{NetworkFetcher, Provenance};
use strata_io::{DirectoryStore, ResourceFetcher};
use tempfile::tempdir;

/// Answers every URL with the URL itself.
#[derive(Default)]
struct EchoNetwork {
    hits: AtomicUsize,
}

#[async_trait]
impl NetworkFetcher for EchoNetwork {
    async fn get(&self, url: &str) -> Option<Bytes> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Some(Bytes::copy_from_slice(url.as_bytes()))
    }
}

#[tokio::test]
async fn test_directory_store_shadows_network() -> Result<()> {
    let dir = tempdir()?;
    let store = Arc::new(DirectoryStore::open(dir.path())?);
    store.put("sounds/rain.ogg", "rain.ogg", b"cached rain")?;

    let network = Arc::new(EchoNetwork::default());
    let fetcher = ResourceFetcher::new(store.clone(), network.clone())
        .with_resource_folder("https://assets.example/");

    let local = fetcher.fetch(&"sounds/rain.ogg".into()).await.unwrap();
    assert_eq!(local.provenance, Provenance::Persisted);
    assert_eq!(&local.bytes[..], b"cached rain");
    assert_eq!(network.hits.load(Ordering::SeqCst), 0);

    store.delete("sounds/rain.ogg")?;
    let remote = fetcher.fetch(&"sounds/rain.ogg".into()).await.unwrap();
    assert_eq!(remote.provenance, Provenance::Network);
    assert_eq!(&remote.bytes[..], b"https://assets.example/sounds/rain.ogg");
    assert_eq!(network.hits.load(Ordering::SeqCst), 1);
    Ok(())
}
