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

//! PCM WAV decoding through `hound`.

use crate::asset_lane::AssetLoaderLane;
use anyhow::{bail, Context};
use hound::{SampleFormat, WavReader};
use std::{error::Error, io::Cursor};
use strata_core::lane::{Lane, LaneKind};
use strata_data::assets::SoundData;

/// Returns `true` if `bytes` start with a RIFF/WAVE header.
pub fn is_wav(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}

/// Decodes integer and float PCM WAV files without a container probe.
///
/// Integer samples are scaled by their bit depth into `[-1.0, 1.0]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WavLoaderLane;

impl WavLoaderLane {
    fn decode(bytes: &[u8]) -> anyhow::Result<SoundData> {
        let mut reader = WavReader::new(Cursor::new(bytes)).context("Not a readable WAV stream")?;
        let spec = reader.spec();
        if spec.channels == 0 {
            bail!("WAV header declares no channels");
        }

        let samples = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .context("Truncated float WAV data")?,
            SampleFormat::Int => {
                let scale = (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|s| s as f32 / scale))
                    .collect::<Result<Vec<_>, _>>()
                    .context("Truncated integer WAV data")?
            }
        };

        Ok(SoundData {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }
}

impl AssetLoaderLane<SoundData> for WavLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<SoundData, Box<dyn Error + Send + Sync>> {
        Ok(Self::decode(bytes)?)
    }
}

impl Lane for WavLoaderLane {
    fn strategy_name(&self) -> &'static str {
        "HoundWav"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn encode(spec: WavSpec, frames: &[f32]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for &value in frames {
                for _ in 0..spec.channels {
                    match spec.sample_format {
                        SampleFormat::Float => writer.write_sample(value).unwrap(),
                        SampleFormat::Int => {
                            let max = ((1i64 << (spec.bits_per_sample - 1)) - 1) as f32;
                            writer.write_sample((value * max) as i32).unwrap()
                        }
                    }
                }
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_int16_stereo_is_interleaved_and_normalized() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = encode(spec, &[0.5, -0.5, 1.0]);
        assert!(is_wav(&bytes));

        let sound = WavLoaderLane.load(&bytes).unwrap();

        assert_eq!(sound.channels, 2);
        assert_eq!(sound.sample_rate, 48_000);
        assert_eq!(sound.frames(), 3);
        assert!((sound.samples[0] - 0.5).abs() < 1e-3);
        assert_eq!(sound.samples[2], sound.samples[3]);
        assert!(sound.samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_float_samples_pass_through() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let sound = WavLoaderLane.load(&encode(spec, &[0.25, -0.75])).unwrap();
        assert_eq!(sound.samples, vec![0.25, -0.75]);
    }

    #[test]
    fn test_rejects_non_wav_payloads() {
        assert!(!is_wav(b"OggS\0\0\0\0\0\0\0\0"));
        assert!(WavLoaderLane.load(b"RIFF").is_err());
        assert!(WavLoaderLane.load(&[0, 1, 2, 3, 4]).is_err());
    }
}
