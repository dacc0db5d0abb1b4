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

//! The default sound lane, routing each payload to the decoder suited to it.

use super::{is_wav, SymphoniaLoaderLane, WavLoaderLane};
use crate::asset_lane::AssetLoaderLane;
use std::error::Error;
use strata_core::{
    decode::DecodeOptions,
    lane::{Lane, LaneKind},
};
use strata_data::assets::SoundData;

/// Which decoder a payload is sent to first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Wav,
    Symphonia,
}

/// Decodes WAV with `hound` and every other container with `symphonia`.
///
/// A payload goes to `hound` when its reference ends in `.wav` or, without a
/// hint, when it carries a RIFF/WAVE header. WAV variants `hound` cannot read
/// (ADPCM, A-law, ...) are retried with `symphonia`.
#[derive(Default)]
pub struct SoundLoaderLane {
    wav: WavLoaderLane,
    symphonia: SymphoniaLoaderLane,
}

impl SoundLoaderLane {
    /// Creates the lane with both decoders.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(bytes: &[u8], options: &DecodeOptions) -> Route {
        match options.extension_hint.as_deref() {
            Some("wav") => Route::Wav,
            Some(_) => Route::Symphonia,
            None if is_wav(bytes) => Route::Wav,
            None => Route::Symphonia,
        }
    }
}

impl AssetLoaderLane<SoundData> for SoundLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<SoundData, Box<dyn Error + Send + Sync>> {
        self.load_with_options(bytes, &DecodeOptions::default())
    }

    fn load_with_options(
        &self,
        bytes: &[u8],
        options: &DecodeOptions,
    ) -> Result<SoundData, Box<dyn Error + Send + Sync>> {
        match Self::route(bytes, options) {
            Route::Wav => self.wav.load(bytes).or_else(|e| {
                log::debug!(
                    "{} declined the payload ({}), probing with symphonia",
                    self.wav.strategy_name(),
                    e
                );
                self.symphonia.load_with_options(bytes, options)
            }),
            Route::Symphonia => self.symphonia.load_with_options(bytes, options),
        }
    }
}

impl Lane for SoundLoaderLane {
    fn strategy_name(&self) -> &'static str {
        "SoundRouter"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn hinted(extension: &str) -> DecodeOptions {
        DecodeOptions {
            extension_hint: Some(extension.to_string()),
        }
    }

    fn wav_bytes() -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..64 {
                writer.write_sample((i * 100) as i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_routes_by_hint_then_header() {
        let wav = wav_bytes();
        assert_eq!(SoundLoaderLane::route(&wav, &hinted("wav")), Route::Wav);
        assert_eq!(SoundLoaderLane::route(&wav, &hinted("ogg")), Route::Symphonia);
        assert_eq!(SoundLoaderLane::route(&wav, &DecodeOptions::default()), Route::Wav);
        assert_eq!(
            SoundLoaderLane::route(b"ID3\x04", &DecodeOptions::default()),
            Route::Symphonia
        );
    }

    #[test]
    fn test_wav_decodes_with_and_without_hint() {
        let lane = SoundLoaderLane::new();
        let wav = wav_bytes();

        let hinted = lane.load_with_options(&wav, &hinted("wav")).unwrap();
        let sniffed = lane.load(&wav).unwrap();

        assert_eq!(hinted.frames(), 64);
        assert_eq!(hinted.sample_rate, 16_000);
        assert_eq!(hinted, sniffed);
    }

    #[test]
    fn test_garbage_is_rejected_by_both_decoders() {
        let lane = SoundLoaderLane::new();
        assert!(lane.load_with_options(&[9; 32], &hinted("wav")).is_err());
        assert!(lane.load_with_options(&[9; 32], &hinted("mp3")).is_err());
    }
}
