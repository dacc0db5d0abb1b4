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

//! The logical sound asset and its configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strata_core::{
    asset::{AssetHandle, ResourceReference},
    encoding::{AudioFormat, EncodingDescriptor},
};
use strata_data::assets::SoundData;

const DEFAULT_SOUND_NAME: &str = "A Sound";

/// Lifecycle of a logical sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundState {
    /// Allocated, never updated.
    Created,
    /// An update is fetching or decoding its encoding.
    Loading,
    /// Bound to a decoded buffer.
    Ready,
    /// The last update produced no buffer. The sound is unbound.
    Failed,
    /// Terminal. The sound is gone from its agent.
    Removed,
}

/// A partial sound configuration, as stored by the editor.
///
/// Every field is optional; [`SoundConfig::resolve`] fills the gaps with
/// defaults.
///
/// ```
/// use strata_agents::asset_agent::SoundConfig;
///
/// let config: SoundConfig =
///     serde_json::from_str(r#"{ "volume": 0.5, "audioRefs": { "ogg": "a.ogg" } }"#).unwrap();
/// let settings = config.resolve();
/// assert_eq!(settings.volume, 0.5);
/// assert_eq!(settings.name, "A Sound");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoundConfig {
    /// Whether playback restarts at the end.
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
    /// Playback gain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
    /// Whether the sound is positioned in 3D.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatialize: Option<bool>,
    /// Start playing as soon as a buffer is bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_play: Option<bool>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The encodings this sound is shipped in.
    pub audio_refs: BTreeMap<AudioFormat, ResourceReference>,
}

impl SoundConfig {
    /// Adds (or replaces) the reference of one encoding.
    pub fn with_audio_ref(
        mut self,
        format: AudioFormat,
        reference: impl Into<ResourceReference>,
    ) -> Self {
        self.audio_refs.insert(format, reference.into());
        self
    }

    /// Sets the playback gain.
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Sets whether playback loops.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = Some(looping);
        self
    }

    /// Sets whether the sound is positioned in 3D.
    pub fn with_spatialize(mut self, spatialize: bool) -> Self {
        self.spatialize = Some(spatialize);
        self
    }

    /// Sets whether playback starts on bind.
    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = Some(auto_play);
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Merges this config over the defaults.
    pub fn resolve(&self) -> SoundSettings {
        let defaults = SoundSettings::default();
        SoundSettings {
            looping: self.looping.unwrap_or(defaults.looping),
            volume: self.volume.unwrap_or(defaults.volume),
            spatialize: self.spatialize.unwrap_or(defaults.spatialize),
            auto_play: self.auto_play.unwrap_or(defaults.auto_play),
            name: self.name.clone().unwrap_or(defaults.name),
            audio_refs: self.audio_refs.clone(),
        }
    }
}

/// A fully resolved sound configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundSettings {
    /// Restart at the end. Defaults to `false`.
    pub looping: bool,
    /// Playback gain. Defaults to `1.0`.
    pub volume: f32,
    /// Positioned in 3D. Defaults to `false`.
    pub spatialize: bool,
    /// Play as soon as a buffer is bound. Defaults to `false`.
    pub auto_play: bool,
    /// Display name. Defaults to `"A Sound"`.
    pub name: String,
    /// Candidate encodings. Defaults to none.
    pub audio_refs: BTreeMap<AudioFormat, ResourceReference>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            looping: false,
            volume: 1.0,
            spatialize: false,
            auto_play: false,
            name: DEFAULT_SOUND_NAME.to_string(),
            audio_refs: BTreeMap::new(),
        }
    }
}

/// A logical sound, as tracked by an [`AssetAgent`](super::AssetAgent).
///
/// Values handed out by the agent are snapshots: they share the decoded
/// buffer but do not follow later changes.
#[derive(Debug, Clone)]
pub struct Sound {
    id: ResourceReference,
    settings: SoundSettings,
    buffer: Option<AssetHandle<SoundData>>,
    encoding: Option<EncodingDescriptor>,
    state: SoundState,
    playing: bool,
    /// Distinguishes a re-created sound from a removed one with the same id.
    pub(crate) incarnation: u64,
    /// The raw reference the latest update asked for.
    pub(crate) requested: Option<ResourceReference>,
}

impl Sound {
    pub(crate) fn new(id: ResourceReference, incarnation: u64) -> Self {
        Self {
            id,
            settings: SoundSettings::default(),
            buffer: None,
            encoding: None,
            state: SoundState::Created,
            playing: false,
            incarnation,
            requested: None,
        }
    }

    /// The logical asset id.
    pub fn id(&self) -> &ResourceReference {
        &self.id
    }

    /// The resolved settings of the latest update.
    pub fn settings(&self) -> &SoundSettings {
        &self.settings
    }

    /// The bound decoded buffer, if any.
    pub fn buffer(&self) -> Option<&AssetHandle<SoundData>> {
        self.buffer.as_ref()
    }

    /// The encoding chosen by the latest update.
    pub fn encoding(&self) -> Option<&EncodingDescriptor> {
        self.encoding.as_ref()
    }

    /// The lifecycle state.
    pub fn state(&self) -> SoundState {
        self.state
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether a decoded buffer is bound.
    pub fn is_bound(&self) -> bool {
        self.buffer.is_some()
    }

    pub(crate) fn update(&mut self, settings: SoundSettings) {
        self.settings = settings;
    }

    pub(crate) fn set_state(&mut self, state: SoundState) {
        self.state = state;
    }

    pub(crate) fn set_encoding(&mut self, encoding: Option<EncodingDescriptor>) {
        self.encoding = encoding;
    }

    /// Binds `buffer`; playback starts right away when `auto_play` is set.
    pub(crate) fn set_buffer(&mut self, buffer: AssetHandle<SoundData>) {
        self.buffer = Some(buffer);
        if self.settings.auto_play {
            self.playing = true;
        }
    }

    /// Starts playback. Does nothing while unbound.
    pub(crate) fn play(&mut self) -> bool {
        if self.buffer.is_none() {
            return false;
        }
        self.playing = true;
        true
    }

    pub(crate) fn stop(&mut self) {
        self.playing = false;
    }

    /// Stops playback and drops the buffer.
    pub(crate) fn release(&mut self) {
        self.stop();
        self.buffer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> AssetHandle<SoundData> {
        AssetHandle::new(SoundData {
            samples: vec![0.0; 8],
            channels: 2,
            sample_rate: 44_100,
        })
    }

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        let settings = SoundConfig::default().resolve();
        assert_eq!(settings, SoundSettings::default());
        assert!(!settings.looping);
        assert_eq!(settings.volume, 1.0);
        assert_eq!(settings.name, "A Sound");
        assert!(settings.audio_refs.is_empty());
    }

    #[test]
    fn test_editor_document_uses_camel_case_keys() {
        let config: SoundConfig = serde_json::from_value(serde_json::json!({
            "loop": true,
            "autoPlay": true,
            "name": "Explosion",
            "audioRefs": { "mp3": "a.mp3", "ogg": "a.ogg" }
        }))
        .unwrap();

        let settings = config.resolve();
        assert!(settings.looping);
        assert!(settings.auto_play);
        assert!(!settings.spatialize);
        assert_eq!(settings.name, "Explosion");
        assert_eq!(settings.audio_refs[&AudioFormat::Ogg].as_str(), "a.ogg");

        let written = serde_json::to_value(&config).unwrap();
        assert_eq!(written["loop"], true);
        assert!(written.get("volume").is_none());
    }

    #[test]
    fn test_auto_play_starts_on_bind() {
        let mut sound = Sound::new("s".into(), 0);
        sound.update(SoundConfig::default().with_auto_play(true).resolve());
        sound.set_buffer(buffer());
        assert!(sound.is_playing());

        sound.release();
        assert!(!sound.is_playing());
        assert!(!sound.is_bound());
    }

    #[test]
    fn test_play_requires_a_buffer() {
        let mut sound = Sound::new("s".into(), 0);
        assert!(!sound.play());

        sound.set_buffer(buffer());
        assert!(!sound.is_playing());
        assert!(sound.play());
        sound.stop();
        assert!(!sound.is_playing());
        assert!(sound.is_bound());
    }
}
