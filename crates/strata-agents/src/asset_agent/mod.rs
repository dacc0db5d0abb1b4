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

//! Acts as the **[A]gent** for the asset subsystem.
//!
//! This module provides the high-level logic for asset management. It is the
//! public-facing API for requesting assets and querying their state, but it
//! delegates the heavy lifting to its collaborators:
//! - [`FormatNegotiator`] picks which encoding of a sound the runtime can decode.
//! - [`DecodedAssetCache`] deduplicates and caches fetch+decode work per reference.
//! - The decode lanes of `strata-lanes` turn bytes into assets.
//!
//! The primary entry point is [`AssetAgent`].

pub mod agent;
mod cache;
mod error;
mod negotiator;
mod sound;

pub use agent::AssetAgent;
pub use cache::DecodedAssetCache;
pub use error::ConfigError;
pub use negotiator::{Codec, FormatNegotiator};
pub use sound::{Sound, SoundConfig, SoundSettings, SoundState};
