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

//! Texture decoding.

use crate::asset_lane::AssetLoaderLane;
use anyhow::Context;
use std::error::Error;
use strata_core::lane::{Lane, LaneKind};
use strata_data::assets::Texture;

/// A lane dedicated to decoding image files into RGBA8 textures on the CPU.
#[derive(Clone, Default)]
pub struct TextureLoaderLane;

impl AssetLoaderLane<Texture> for TextureLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<Texture, Box<dyn Error + Send + Sync>> {
        // Decode the image using the `image` crate
        let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;

        // Convert to RGBA8 (keep in sRGB space)
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Ok(Texture {
            pixels: rgba_img.into_raw(),
            width,
            height,
        })
    }
}

impl Lane for TextureLoaderLane {
    fn strategy_name(&self) -> &'static str {
        "TextureLoader"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Asset
    }
}
