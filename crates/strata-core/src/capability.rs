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

//! Runtime capability detection.

use crate::encoding::AudioFormat;
use std::collections::HashSet;

/// Answers what the running platform is able to decode and play.
///
/// Implementations are queried at most once per format by a negotiator, so
/// probing is allowed to be expensive.
pub trait CapabilityProbe: Send + Sync {
    /// Whether any audio decoding is available at all.
    fn has_audio_context(&self) -> bool;

    /// Whether the runtime can decode `format`.
    fn can_decode(&self, format: AudioFormat) -> bool;
}

/// A probe with a fixed answer, for headless setups and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedCapabilities {
    audio: bool,
    formats: HashSet<AudioFormat>,
}

impl FixedCapabilities {
    /// A runtime with an audio context able to decode exactly `formats`.
    pub fn with_formats(formats: impl IntoIterator<Item = AudioFormat>) -> Self {
        Self {
            audio: true,
            formats: formats.into_iter().collect(),
        }
    }

    /// A runtime without any audio context.
    pub fn without_audio() -> Self {
        Self::default()
    }
}

impl CapabilityProbe for FixedCapabilities {
    fn has_audio_context(&self) -> bool {
        self.audio
    }

    fn can_decode(&self, format: AudioFormat) -> bool {
        self.audio && self.formats.contains(&format)
    }
}
