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

use std::error::Error;
use strata_core::{asset::Asset, decode::DecodeOptions, lane::Lane};

/// A lane that decodes a specific kind of asset from a byte slice.
///
/// Implementors do the potentially CPU-intensive work of parsing and decoding
/// raw file data into an engine-ready asset type. Each lane is specialized for
/// a single asset type `A`.
pub trait AssetLoaderLane<A: Asset>: Lane {
    /// Parses a byte slice and converts it into an instance of the asset `A`.
    ///
    /// # Returns
    /// The decoded asset, or a boxed, thread-safe error when the bytes are
    /// not a valid payload for this lane.
    fn load(&self, bytes: &[u8]) -> Result<A, Box<dyn Error + Send + Sync>>;

    /// Like [`load`](Self::load), with per-call hints.
    ///
    /// Lanes that can exploit a hint (e.g. the file extension) override this.
    fn load_with_options(
        &self,
        bytes: &[u8],
        _options: &DecodeOptions,
    ) -> Result<A, Box<dyn Error + Send + Sync>> {
        self.load(bytes)
    }
}
