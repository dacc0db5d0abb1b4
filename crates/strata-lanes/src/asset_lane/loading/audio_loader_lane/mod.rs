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

//! Audio decoding lanes and the audio capability probe.

mod probe;
mod sound_loader_lane;
mod symphonia_loader_lane;
mod wav_loader_lane;

pub use probe::SymphoniaProbe;
pub use sound_loader_lane::SoundLoaderLane;
pub use symphonia_loader_lane::SymphoniaLoaderLane;
pub use wav_loader_lane::{is_wav, WavLoaderLane};
