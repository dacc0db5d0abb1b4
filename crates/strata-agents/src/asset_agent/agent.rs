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

//! Defines the `AssetAgent`, the owner of logical sound lifecycles.

use super::{
    cache::DecodedAssetCache,
    error::ConfigError,
    negotiator::{Codec, FormatNegotiator},
    sound::{Sound, SoundConfig, SoundState},
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strata_core::{
    asset::{AssetHandle, ResourceReference},
    capability::CapabilityProbe,
    config::ConfigStore,
    decode::DecodeBackend,
};
use strata_data::assets::{SoundData, Texture};
use strata_io::ResourceFetcher;
use strata_lanes::asset_lane::{LaneBackend, SoundLoaderLane, SymphoniaProbe, TextureLoaderLane};
use tokio::task::JoinHandle;

/// The live logical sounds, keyed by id.
#[derive(Default)]
struct Registry {
    entries: HashMap<ResourceReference, Sound>,
    next_incarnation: u64,
}

impl Registry {
    fn get_or_create(&mut self, id: &ResourceReference) -> &mut Sound {
        let next_incarnation = &mut self.next_incarnation;
        self.entries.entry(id.clone()).or_insert_with(|| {
            let incarnation = *next_incarnation;
            *next_incarnation += 1;
            log::debug!("Creating sound '{}'", id);
            Sound::new(id.clone(), incarnation)
        })
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// How far an update got before its caller regains control.
enum UpdateOutcome {
    /// Nothing left to wait for.
    Settled(Option<Sound>),
    /// A load was started; the bind task resolves to the final snapshot.
    Binding(JoinHandle<Option<Sound>>),
}

/// Manages the lifecycle of logical sounds and the decoded assets behind them.
///
/// The agent owns the [`FormatNegotiator`] that picks an encoding per sound
/// and one [`DecodedAssetCache`] per asset kind, so every sound and texture
/// requested through the same agent shares decoded data.
///
/// Loads started by an agent are never cancelled: dropping the future returned
/// by [`update`](Self::update) leaves the load and the bind running.
pub struct AssetAgent {
    negotiator: FormatNegotiator,
    sounds: DecodedAssetCache<SoundData>,
    textures: DecodedAssetCache<Texture>,
    sound_backend: Arc<dyn DecodeBackend<SoundData>>,
    texture_backend: Arc<dyn DecodeBackend<Texture>>,
    config_store: Option<Arc<dyn ConfigStore>>,
    registry: Arc<Mutex<Registry>>,
}

impl AssetAgent {
    /// Creates an agent loading through `fetcher`, with codec support reported by `probe`.
    ///
    /// Sounds decode with [`SoundLoaderLane`] (hound for WAV, symphonia for the
    /// rest) and textures with the `image` crate until other backends are installed.
    pub fn new(fetcher: ResourceFetcher, probe: Arc<dyn CapabilityProbe>) -> Self {
        let fetcher = Arc::new(fetcher);
        Self {
            negotiator: FormatNegotiator::new(probe),
            sounds: DecodedAssetCache::new(fetcher.clone()),
            textures: DecodedAssetCache::new(fetcher),
            sound_backend: Arc::new(LaneBackend::new(SoundLoaderLane::new())),
            texture_backend: Arc::new(LaneBackend::new(TextureLoaderLane)),
            config_store: None,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    /// Creates an agent whose codec support is whatever symphonia was built with.
    pub fn with_symphonia(fetcher: ResourceFetcher) -> Self {
        Self::new(fetcher, Arc::new(SymphoniaProbe))
    }

    /// Replaces the sound decoder.
    pub fn with_sound_backend(mut self, backend: Arc<dyn DecodeBackend<SoundData>>) -> Self {
        self.sound_backend = backend;
        self
    }

    /// Replaces the texture decoder.
    pub fn with_texture_backend(mut self, backend: Arc<dyn DecodeBackend<Texture>>) -> Self {
        self.texture_backend = backend;
        self
    }

    /// Attaches the store [`refresh`](Self::refresh) reads configs from.
    pub fn with_config_store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.config_store = Some(store);
        self
    }

    /// Allocates a sound in the `Created` state.
    ///
    /// A live sound with the same id is returned untouched.
    pub fn create(&self, id: impl Into<ResourceReference>) -> Sound {
        let id = id.into();
        lock(&self.registry).get_or_create(&id).clone()
    }

    /// Applies `config` to the sound `id` and loads the encoding it selects.
    ///
    /// The sound is created if needed, takes the resolved settings and enters
    /// `Loading` before this function returns. The future resolves to a
    /// snapshot of the sound once the load settled:
    /// - `Ready` with a bound buffer on success;
    /// - `Failed` and unbound when no requested encoding is decodable, or the
    ///   bytes could not be fetched or decoded;
    /// - `Removed` when the sound was removed while loading.
    ///
    /// Without any audio context the update is ignored and resolves `None`.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime when a load is started.
    pub fn update(
        &self,
        id: impl Into<ResourceReference>,
        config: SoundConfig,
    ) -> impl Future<Output = Option<Sound>> + Send + 'static {
        let outcome = self.begin_update(id.into(), config);
        async move {
            match outcome {
                UpdateOutcome::Settled(sound) => sound,
                UpdateOutcome::Binding(task) => task.await.unwrap_or_else(|e| {
                    log::error!("Sound bind task failed: {}", e);
                    None
                }),
            }
        }
    }

    fn begin_update(&self, id: ResourceReference, config: SoundConfig) -> UpdateOutcome {
        if !self.negotiator.has_audio_context() {
            log::debug!("No audio context, ignoring update of '{}'", id);
            return UpdateOutcome::Settled(None);
        }

        let settings = config.resolve();
        let selected = self.negotiator.select(&settings.audio_refs);

        let mut registry = lock(&self.registry);
        let sound = registry.get_or_create(&id);
        sound.update(settings);
        sound.set_state(SoundState::Loading);
        sound.set_encoding(selected.clone());

        let Some(encoding) = selected else {
            log::warn!("No supported audio format for sound '{}'", id);
            sound.release();
            sound.requested = None;
            sound.set_state(SoundState::Failed);
            return UpdateOutcome::Settled(Some(sound.clone()));
        };

        let reference = encoding.reference;
        if sound.requested.as_ref() != Some(&reference) {
            sound.release();
        }
        sound.requested = Some(reference.clone());
        let incarnation = sound.incarnation;
        let mut removed = sound.clone();
        drop(registry);

        // Claims the load now, while the sound is known to be live.
        let load = self.sounds.get_or_load(&reference, self.sound_backend.clone());
        let registry = self.registry.clone();

        UpdateOutcome::Binding(tokio::spawn(async move {
            let buffer = load.await;

            let mut registry = lock(&registry);
            let Some(sound) = registry
                .entries
                .get_mut(&id)
                .filter(|sound| sound.incarnation == incarnation)
            else {
                log::debug!("Sound '{}' was removed while loading '{}'", id, reference);
                removed.release();
                removed.set_state(SoundState::Removed);
                return Some(removed);
            };

            if sound.requested.as_ref() != Some(&reference) {
                // A later update moved the sound to another encoding.
                return Some(sound.clone());
            }

            match buffer {
                Some(buffer) => {
                    sound.set_buffer(buffer);
                    sound.set_state(SoundState::Ready);
                }
                None => {
                    log::error!("Failed to load sound '{}' from '{}'", id, reference);
                    sound.release();
                    sound.set_state(SoundState::Failed);
                }
            }
            Some(sound.clone())
        }))
    }

    /// Stops and releases the sound `id`, then forgets it.
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn remove(&self, id: &str) -> bool {
        let Some(mut sound) = lock(&self.registry).entries.remove(id) else {
            return false;
        };
        sound.release();
        sound.set_state(SoundState::Removed);
        log::debug!("Removed sound '{}'", id);
        true
    }

    /// Re-reads the config of `id` from the attached store and applies it.
    ///
    /// A missing config means the asset was deleted, so the sound is removed
    /// and `Ok(None)` returned.
    pub async fn refresh(
        &self,
        id: impl Into<ResourceReference>,
    ) -> Result<Option<Sound>, ConfigError> {
        let store = self.config_store.as_ref().ok_or(ConfigError::NoStore)?;
        let id = id.into();

        let Some(document) = store.get_config(&id) else {
            self.remove(id.as_str());
            return Ok(None);
        };
        let config: SoundConfig =
            serde_json::from_value(document).map_err(|source| ConfigError::Malformed {
                reference: id.to_string(),
                source,
            })?;

        Ok(self.update(id, config).await)
    }

    /// Starts playback of a bound sound.
    pub fn play(&self, id: &str) -> bool {
        lock(&self.registry)
            .entries
            .get_mut(id)
            .is_some_and(|sound| sound.play())
    }

    /// Stops playback of a sound.
    pub fn stop(&self, id: &str) -> bool {
        match lock(&self.registry).entries.get_mut(id) {
            Some(sound) => {
                sound.stop();
                true
            }
            None => false,
        }
    }

    /// A snapshot of the sound `id`.
    pub fn get(&self, id: &str) -> Option<Sound> {
        lock(&self.registry).entries.get(id).cloned()
    }

    /// Number of live sounds.
    pub fn len(&self) -> usize {
        lock(&self.registry).entries.len()
    }

    /// Returns `true` if no sound is live.
    pub fn is_empty(&self) -> bool {
        lock(&self.registry).entries.is_empty()
    }

    /// Loads a batch of textures concurrently.
    ///
    /// Resolves to one slot per reference, in order, once every load settled.
    pub fn load_all(
        &self,
        references: &[ResourceReference],
    ) -> impl Future<Output = Vec<Option<AssetHandle<Texture>>>> + Send + 'static {
        self.textures.load_all(references, self.texture_backend.clone())
    }

    /// Loads the textures `names` found under `folder`.
    pub fn load_textures<S: AsRef<str>>(
        &self,
        folder: &str,
        names: &[S],
    ) -> impl Future<Output = Vec<Option<AssetHandle<Texture>>>> + Send + 'static {
        let references: Vec<ResourceReference> = names
            .iter()
            .map(|name| ResourceReference::new(format!("{}{}", folder, name.as_ref())))
            .collect();
        self.load_all(&references)
    }

    /// The probed codec table.
    pub fn codecs(&self) -> &[Codec] {
        self.negotiator.codecs()
    }

    /// The encoding negotiator.
    pub fn negotiator(&self) -> &FormatNegotiator {
        &self.negotiator
    }

    /// The decoded sound buffers.
    pub fn sound_cache(&self) -> &DecodedAssetCache<SoundData> {
        &self.sounds
    }

    /// The decoded textures.
    pub fn texture_cache(&self) -> &DecodedAssetCache<Texture> {
        &self.textures
    }
}
