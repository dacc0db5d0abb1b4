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

//! Encodings a logical audio asset can be shipped in.

use crate::asset::ResourceReference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One byte-format variant of an audio asset.
///
/// The declaration order is the negotiation priority: when several encodings
/// are both requested and decodable, the earliest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG-1 Layer III.
    Mp3,
    /// Ogg container with a Vorbis stream.
    Ogg,
    /// RIFF WAVE, PCM.
    Wav,
}

impl AudioFormat {
    /// Every known encoding, in negotiation priority order.
    pub const PRIORITY: [AudioFormat; 3] = [AudioFormat::Mp3, AudioFormat::Ogg, AudioFormat::Wav];

    /// The tag used as a key in asset configs (`"mp3"`, `"ogg"`, `"wav"`).
    pub fn tag(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Wav => "wav",
        }
    }

    /// The MIME type (with codec parameters) a playback runtime is probed with.
    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg;",
            AudioFormat::Ogg => "audio/ogg; codecs=\"vorbis\"",
            AudioFormat::Wav => "audio/wav; codecs=\"1\"",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One candidate encoding of a logical asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingDescriptor {
    /// Which byte format the reference points to.
    pub format: AudioFormat,
    /// Where the encoded bytes live.
    pub reference: ResourceReference,
    /// Whether the runtime can decode this format.
    pub enabled: bool,
}
