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

//! Defines the core asset type for audio data.

use strata_core::asset::Asset;
use std::time::Duration;

/// Represents a sound asset, decoded and ready for playback.
///
/// This struct holds audio data in a normalized, interleaved `f32` format.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundData {
    /// The raw, interleaved audio samples.
    /// For stereo, samples are ordered `[L, R, L, R, ...]`.
    /// Values are expected to be in the range `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// The number of channels in the audio data (e.g., 1 for mono, 2 for stereo).
    pub channels: u16,
    /// The number of samples per second (e.g., 44100 Hz).
    pub sample_rate: u32,
}

impl SoundData {
    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Playback length of the buffer.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

impl Asset for SoundData {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_of_stereo_buffer() {
        let sound = SoundData {
            samples: vec![0.0; 44100 * 2],
            channels: 2,
            sample_rate: 44100,
        };
        assert_eq!(sound.frames(), 44100);
        assert_eq!(sound.duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_degenerate_buffer_has_no_duration() {
        let sound = SoundData {
            samples: vec![0.5; 10],
            channels: 0,
            sample_rate: 0,
        };
        assert_eq!(sound.frames(), 0);
        assert_eq!(sound.duration(), Duration::ZERO);
    }
}
