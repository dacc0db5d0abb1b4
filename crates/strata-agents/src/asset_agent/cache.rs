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

//! A deduplicating cache of decoded assets.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strata_core::{
    asset::{Asset, AssetHandle, ResourceReference},
    decode::{DecodeBackend, DecodeOptions},
};
use strata_data::assets::Assets;
use strata_io::ResourceFetcher;
use tokio::sync::oneshot;

type Waiter<A> = oneshot::Sender<Option<AssetHandle<A>>>;

/// One in-flight fetch+decode and the callers waiting on it.
struct PendingLoad<A: Asset> {
    waiters: Vec<Waiter<A>>,
}

struct CacheState<A: Asset> {
    assets: Assets<A>,
    pending: HashMap<ResourceReference, PendingLoad<A>>,
}

/// What a caller got when asking for a reference.
enum Claim<A: Asset> {
    Cached(AssetHandle<A>),
    Waiting(oneshot::Receiver<Option<AssetHandle<A>>>),
}

/// Caches decoded assets of kind `A`, keyed by raw reference.
///
/// Guarantees:
/// - a reference maps to at most one decoded asset;
/// - a reference has at most one fetch+decode in flight, shared by every caller
///   that asks while it runs;
/// - a failed load is never stored, so the next request retries from scratch.
///
/// Cloning the cache shares its state.
pub struct DecodedAssetCache<A: Asset> {
    fetcher: Arc<ResourceFetcher>,
    state: Arc<Mutex<CacheState<A>>>,
}

impl<A: Asset> Clone for DecodedAssetCache<A> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            state: self.state.clone(),
        }
    }
}

impl<A: Asset> DecodedAssetCache<A> {
    /// Creates an empty cache resolving bytes through `fetcher`.
    pub fn new(fetcher: Arc<ResourceFetcher>) -> Self {
        Self {
            fetcher,
            state: Arc::new(Mutex::new(CacheState {
                assets: Assets::new(),
                pending: HashMap::new(),
            })),
        }
    }

    /// Returns the decoded asset for `reference`, loading it with `backend` if needed.
    ///
    /// The request is registered before this function returns: a cached asset
    /// is captured, an in-flight load is joined, or a new load is claimed and
    /// started. The returned future only waits. The load itself runs on its own
    /// task and completes even if every caller drops its future.
    ///
    /// Resolves `None` when the bytes could not be fetched or decoded.
    ///
    /// # Panics
    ///
    /// Starting a new load spawns a task, so this must be called from within a
    /// tokio runtime.
    pub fn get_or_load(
        &self,
        reference: &ResourceReference,
        backend: Arc<dyn DecodeBackend<A>>,
    ) -> impl Future<Output = Option<AssetHandle<A>>> + Send + 'static {
        let claim = self.claim(reference, backend);
        async move {
            match claim {
                Claim::Cached(handle) => Some(handle),
                // A dropped sender means the load task died before finishing.
                Claim::Waiting(receiver) => receiver.await.unwrap_or(None),
            }
        }
    }

    /// Loads every reference concurrently.
    ///
    /// Resolves once all loads have settled, to one slot per input in input
    /// order. A failure only empties its own slot.
    pub fn load_all(
        &self,
        references: &[ResourceReference],
        backend: Arc<dyn DecodeBackend<A>>,
    ) -> impl Future<Output = Vec<Option<AssetHandle<A>>>> + Send + 'static {
        let loads: Vec<_> = references
            .iter()
            .map(|reference| self.get_or_load(reference, backend.clone()))
            .collect();
        async move {
            let mut results = Vec::with_capacity(loads.len());
            for load in loads {
                results.push(load.await);
            }
            results
        }
    }

    /// Whether a decoded asset is stored for `reference`.
    pub fn contains(&self, reference: &str) -> bool {
        self.lock().assets.contains(reference)
    }

    /// The stored asset for `reference`, without loading.
    pub fn get(&self, reference: &str) -> Option<AssetHandle<A>> {
        self.lock().assets.get(reference).cloned()
    }

    /// Drops the cache's handle for `reference`; the next request reloads it.
    pub fn evict(&self, reference: &str) -> Option<AssetHandle<A>> {
        self.lock().assets.remove(reference)
    }

    /// Number of decoded assets stored.
    pub fn len(&self) -> usize {
        self.lock().assets.len()
    }

    /// Returns `true` if no decoded asset is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().assets.is_empty()
    }

    /// Number of loads currently in flight.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState<A>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim(&self, reference: &ResourceReference, backend: Arc<dyn DecodeBackend<A>>) -> Claim<A> {
        let (sender, receiver) = oneshot::channel();
        {
            let mut state = self.lock();
            if let Some(handle) = state.assets.get(reference.as_str()) {
                log::debug!("Cache hit for '{}'", reference);
                return Claim::Cached(handle.clone());
            }
            if let Some(pending) = state.pending.get_mut(reference) {
                log::debug!("Joining in-flight load of '{}'", reference);
                pending.waiters.push(sender);
                return Claim::Waiting(receiver);
            }
            state.pending.insert(
                reference.clone(),
                PendingLoad {
                    waiters: vec![sender],
                },
            );
        }

        let completion = LoadCompletion {
            state: self.state.clone(),
            reference: reference.clone(),
            result: None,
        };
        tokio::spawn(run_load(self.fetcher.clone(), backend, completion));
        Claim::Waiting(receiver)
    }
}

/// Settles a claimed load when dropped.
///
/// Stores a successful result, removes the pending entry and notifies every
/// waiter in arrival order. Running on drop means a panicking backend still
/// releases its waiters (with `None`) instead of leaving the reference stuck.
struct LoadCompletion<A: Asset> {
    state: Arc<Mutex<CacheState<A>>>,
    reference: ResourceReference,
    result: Option<AssetHandle<A>>,
}

impl<A: Asset> Drop for LoadCompletion<A> {
    fn drop(&mut self) {
        let waiters = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(handle) = &self.result {
                state.assets.insert(self.reference.clone(), handle.clone());
            }
            state
                .pending
                .remove(&self.reference)
                .map(|pending| pending.waiters)
                .unwrap_or_default()
        };

        for waiter in waiters {
            // The waiter may have stopped listening; the result is cached anyway.
            let _ = waiter.send(self.result.clone());
        }
    }
}

async fn run_load<A: Asset>(
    fetcher: Arc<ResourceFetcher>,
    backend: Arc<dyn DecodeBackend<A>>,
    mut completion: LoadCompletion<A>,
) {
    let reference = completion.reference.clone();

    let Some(fetched) = fetcher.fetch(&reference).await else {
        log::warn!("Could not fetch '{}'", reference);
        return;
    };

    let options = DecodeOptions::for_reference(&reference);
    match backend.decode(fetched.bytes, &options).await {
        Ok(asset) => {
            log::debug!("Decoded '{}' ({:?})", reference, fetched.provenance);
            completion.result = Some(AssetHandle::new(asset));
        }
        Err(e) => {
            log::error!("Could not decode '{}': {}", reference, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use strata_core::decode::DecodeError;
    use strata_core::io::NetworkFetcher;
    use strata_io::MemoryStore;

    #[derive(Debug)]
    struct Blob(Vec<u8>);
    impl Asset for Blob {}

    #[derive(Default)]
    struct CountingNetwork {
        requests: AtomicUsize,
    }

    #[async_trait]
    impl NetworkFetcher for CountingNetwork {
        async fn get(&self, url: &str) -> Option<Bytes> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if url.contains("missing") {
                return None;
            }
            Some(Bytes::copy_from_slice(url.as_bytes()))
        }
    }

    /// Rejects the first `failures` payloads, then accepts everything.
    #[derive(Default)]
    struct FlakyBackend {
        decodes: AtomicUsize,
        failures: usize,
    }

    #[async_trait]
    impl DecodeBackend<Blob> for FlakyBackend {
        async fn decode(
            &self,
            bytes: Bytes,
            _options: &DecodeOptions,
        ) -> Result<Blob, DecodeError> {
            let attempt = self.decodes.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if attempt < self.failures {
                return Err(DecodeError::Unsupported("flaky".into()));
            }
            Ok(Blob(bytes.to_vec()))
        }
    }

    fn cache(network: Arc<CountingNetwork>) -> DecodedAssetCache<Blob> {
        let fetcher = ResourceFetcher::new(Arc::new(MemoryStore::new()), network);
        DecodedAssetCache::new(Arc::new(fetcher))
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_load() {
        let network = Arc::new(CountingNetwork::default());
        let backend = Arc::new(FlakyBackend::default());
        let cache = cache(network.clone());
        let reference = ResourceReference::new("a.ogg");

        let loads: Vec<_> = (0..5)
            .map(|_| cache.get_or_load(&reference, backend.clone()))
            .collect();
        assert_eq!(cache.pending_len(), 1);

        let mut handles = Vec::new();
        for load in loads {
            handles.push(load.await.unwrap());
        }

        assert_eq!(network.requests.load(Ordering::SeqCst), 1);
        assert_eq!(backend.decodes.load(Ordering::SeqCst), 1);
        assert!(handles.iter().all(|h| AssetHandle::ptr_eq(h, &handles[0])));
        assert_eq!(cache.pending_len(), 0);
    }

    #[tokio::test]
    async fn test_cached_asset_is_not_refetched() {
        let network = Arc::new(CountingNetwork::default());
        let backend = Arc::new(FlakyBackend::default());
        let cache = cache(network.clone());
        let reference = ResourceReference::new("a.ogg");

        let first = cache.get_or_load(&reference, backend.clone()).await.unwrap();
        let second = cache.get_or_load(&reference, backend.clone()).await.unwrap();

        assert!(AssetHandle::ptr_eq(&first, &second));
        assert_eq!(network.requests.load(Ordering::SeqCst), 1);
        assert_eq!(&first.0, b"a.ogg");
        assert!(cache.contains("a.ogg"));
    }

    #[tokio::test]
    async fn test_decode_failure_is_not_cached() {
        let network = Arc::new(CountingNetwork::default());
        let backend = Arc::new(FlakyBackend {
            failures: 1,
            ..Default::default()
        });
        let cache = cache(network.clone());
        let reference = ResourceReference::new("a.wav");

        let (a, b) = tokio::join!(
            cache.get_or_load(&reference, backend.clone()),
            cache.get_or_load(&reference, backend.clone())
        );
        assert!(a.is_none() && b.is_none());
        assert!(!cache.contains("a.wav"));
        assert_eq!(cache.pending_len(), 0);

        let retried = cache.get_or_load(&reference, backend.clone()).await;
        assert!(retried.is_some());
        assert_eq!(backend.decodes.load(Ordering::SeqCst), 2);
        assert_eq!(network.requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_resolves_absent_without_decoding() {
        let backend = Arc::new(FlakyBackend::default());
        let cache = cache(Arc::new(CountingNetwork::default()));

        let result = cache.get_or_load(&"missing.mp3".into(), backend.clone()).await;

        assert!(result.is_none());
        assert_eq!(backend.decodes.load(Ordering::SeqCst), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_load_completes_when_caller_drops_its_future() {
        let network = Arc::new(CountingNetwork::default());
        let backend = Arc::new(FlakyBackend::default());
        let cache = cache(network);

        drop(cache.get_or_load(&"a.ogg".into(), backend.clone()));
        while cache.pending_len() > 0 {
            tokio::task::yield_now().await;
        }

        assert!(cache.contains("a.ogg"));
    }

    #[tokio::test]
    async fn test_load_all_preserves_order_and_failures() {
        let backend = Arc::new(FlakyBackend::default());
        let cache = cache(Arc::new(CountingNetwork::default()));
        let references: Vec<ResourceReference> =
            ["g1.png", "missing-a.png", "g3.png", "g1.png", "missing-b.png", "stone.png"]
                .into_iter()
                .map(ResourceReference::from)
                .collect();

        let results = cache.load_all(&references, backend).await;

        assert_eq!(results.len(), 6);
        let present: Vec<bool> = results.iter().map(Option::is_some).collect();
        assert_eq!(present, vec![true, false, true, true, false, true]);
        assert_eq!(&results[2].as_ref().unwrap().0, b"g3.png");
        assert!(AssetHandle::ptr_eq(
            results[0].as_ref().unwrap(),
            results[3].as_ref().unwrap()
        ));
    }

    #[tokio::test]
    async fn test_evict_forces_reload() {
        let network = Arc::new(CountingNetwork::default());
        let backend = Arc::new(FlakyBackend::default());
        let cache = cache(network.clone());

        let first = cache.get_or_load(&"a.ogg".into(), backend.clone()).await.unwrap();
        assert!(cache.evict("a.ogg").is_some());
        let second = cache.get_or_load(&"a.ogg".into(), backend.clone()).await.unwrap();

        assert!(!AssetHandle::ptr_eq(&first, &second));
        assert_eq!(network.requests.load(Ordering::SeqCst), 2);
    }
}
