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

//! Capability probing against symphonia's codec registry.

use strata_core::{capability::CapabilityProbe, encoding::AudioFormat};
use symphonia::core::codecs::{CodecType, CODEC_TYPE_MP3, CODEC_TYPE_PCM_S16LE, CODEC_TYPE_VORBIS};

/// Reports which encodings the linked symphonia build can decode.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaProbe;

impl SymphoniaProbe {
    fn codec_for(format: AudioFormat) -> CodecType {
        match format {
            AudioFormat::Mp3 => CODEC_TYPE_MP3,
            AudioFormat::Ogg => CODEC_TYPE_VORBIS,
            AudioFormat::Wav => CODEC_TYPE_PCM_S16LE,
        }
    }
}

impl CapabilityProbe for SymphoniaProbe {
    fn has_audio_context(&self) -> bool {
        true
    }

    fn can_decode(&self, format: AudioFormat) -> bool {
        let codec = Self::codec_for(format);
        let supported = symphonia::default::get_codecs().get_codec(codec).is_some();
        log::debug!("Probed {} ({}): {}", format, format.mime_type(), supported);
        supported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_formats_enabled_with_full_feature_set() {
        let probe = SymphoniaProbe;
        assert!(probe.has_audio_context());
        for format in AudioFormat::PRIORITY {
            assert!(probe.can_decode(format), "{format} should be decodable");
        }
    }
}
