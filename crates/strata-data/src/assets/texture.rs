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

//! Defines the CPU-side texture asset.

use strata_core::asset::Asset;

/// A decoded 2D image, kept on the CPU until a renderer uploads it.
///
/// Pixels are tightly packed RGBA8 in sRGB space, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// `width * height * 4` bytes of RGBA data.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Texture {
    /// Returns the RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let rgba = self.pixels.get(offset..offset + 4)?;
        Some([rgba[0], rgba[1], rgba[2], rgba[3]])
    }
}

impl Asset for Texture {}
