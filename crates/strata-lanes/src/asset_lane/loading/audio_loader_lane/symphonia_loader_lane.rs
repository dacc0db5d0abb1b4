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

//! Implements a universal decoding lane for audio formats using the `symphonia` library.

use crate::asset_lane::AssetLoaderLane;
use anyhow::anyhow;
use std::{error::Error, io::Cursor};
use strata_core::{
    decode::DecodeOptions,
    lane::{Lane, LaneKind},
};
use strata_data::assets::SoundData;
use symphonia::core::{
    audio::SampleBuffer, codecs::DecoderOptions, errors::Error as SymphoniaError,
    formats::FormatOptions, io::MediaSourceStream, meta::MetadataOptions, probe::Hint,
};

/// An `AssetLoaderLane` that uses `symphonia` to decode MP3, Ogg/Vorbis and WAV.
#[derive(Default)]
pub struct SymphoniaLoaderLane;

impl SymphoniaLoaderLane {
    /// Creates a new instance of `SymphoniaLoaderLane`.
    pub fn new() -> Self {
        Self
    }

    fn decode(
        &self,
        bytes: &[u8],
        extension: Option<&str>,
    ) -> Result<SoundData, Box<dyn Error + Send + Sync>> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = extension {
            hint.with_extension(extension);
        }
        let meta_opts: MetadataOptions = Default::default();
        let fmt_opts: FormatOptions = Default::default();
        let probed = symphonia::default::get_probe().format(&hint, mss, &fmt_opts, &meta_opts)?;
        let mut format_reader = probed.format;

        let track = format_reader
            .default_track()
            .ok_or_else(|| anyhow!("No default audio track found"))?;

        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| anyhow!("Unknown sample rate"))?;
        let channels = track
            .codec_params
            .channels
            .ok_or_else(|| anyhow!("Unknown channel count"))?;

        let dec_opts: DecoderOptions = Default::default();
        let mut decoder = symphonia::default::get_codecs().make(&track.codec_params, &dec_opts)?;

        let mut all_samples = Vec::<f32>::new();

        loop {
            let packet = match format_reader.next_packet() {
                Ok(packet) => packet,
                // End of stream
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(Box::new(e)),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    // Planar (LLL..., RRR...) to interleaved (LRLR...).
                    let mut sample_buf =
                        SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                    sample_buf.copy_interleaved_ref(decoded);
                    all_samples.extend_from_slice(sample_buf.samples());
                }
                // A corrupt packet is not fatal.
                Err(SymphoniaError::DecodeError(e)) => {
                    log::warn!("Skipping undecodable audio packet: {}", e);
                }
                Err(e) => return Err(Box::new(e)),
            }
        }

        if all_samples.is_empty() {
            return Err(anyhow!("No audio frames could be decoded").into());
        }

        Ok(SoundData {
            samples: all_samples,
            channels: channels.count() as u16,
            sample_rate,
        })
    }
}

impl AssetLoaderLane<SoundData> for SymphoniaLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<SoundData, Box<dyn Error + Send + Sync>> {
        self.decode(bytes, None)
    }

    fn load_with_options(
        &self,
        bytes: &[u8],
        options: &DecodeOptions,
    ) -> Result<SoundData, Box<dyn Error + Send + Sync>> {
        self.decode(bytes, options.extension_hint.as_deref())
    }
}

impl Lane for SymphoniaLoaderLane {
    fn strategy_name(&self) -> &'static str {
        "SymphoniaLoader"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_wav(channels: u16, frames: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..frames {
                let value = ((i as f32 * 0.05).sin() * 8000.0) as i16;
                for _ in 0..channels {
                    writer.write_sample(value).unwrap();
                }
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decodes_wav_with_hint() {
        let bytes = sine_wav(2, 2048);
        let options = DecodeOptions {
            extension_hint: Some("wav".into()),
        };

        let sound = SymphoniaLoaderLane::new()
            .load_with_options(&bytes, &options)
            .unwrap();

        assert_eq!(sound.channels, 2);
        assert_eq!(sound.sample_rate, 22050);
        assert_eq!(sound.frames(), 2048);
    }

    #[test]
    fn test_rejects_garbage() {
        let result = SymphoniaLoaderLane::new().load(b"definitely not audio");
        assert!(result.is_err());
    }
}
