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

//! Defines the abstract `DecodeBackend` trait.

use crate::asset::{Asset, ResourceReference};
use async_trait::async_trait;
use bytes::Bytes;
use std::error::Error;

/// Per-call information handed to a decoder alongside the bytes.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Lowercase file extension of the source reference, if any.
    ///
    /// Container-probing decoders can use it to skip format detection.
    pub extension_hint: Option<String>,
}

impl DecodeOptions {
    /// Builds the options for decoding the bytes behind `reference`.
    pub fn for_reference(reference: &ResourceReference) -> Self {
        Self {
            extension_hint: reference.extension(),
        }
    }
}

/// An error produced by a [`DecodeBackend`] that rejected its input.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not a valid payload for this decoder.
    #[error("decoder rejected the payload: {0}")]
    Rejected(#[source] Box<dyn Error + Send + Sync>),
    /// The decoder has no support for the payload's format or codec.
    #[error("unsupported payload: {0}")]
    Unsupported(String),
}

/// The contract of a decoder for one asset kind.
///
/// The backend is the boundary between the loading pipeline and the code that
/// actually understands a byte format. It may suspend (e.g. to hand the work to
/// a codec service) and may fail; the pipeline folds failures into an absent
/// result and never caches them.
#[async_trait]
pub trait DecodeBackend<A: Asset>: Send + Sync {
    /// Decodes `bytes` into an engine-usable asset.
    async fn decode(&self, bytes: Bytes, options: &DecodeOptions) -> Result<A, DecodeError>;
}
