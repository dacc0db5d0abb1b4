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

//! Adapts synchronous loader lanes to the asynchronous decode contract.

use super::AssetLoaderLane;
use async_trait::async_trait;
use bytes::Bytes;
use std::marker::PhantomData;
use strata_core::{
    asset::Asset,
    decode::{DecodeBackend, DecodeError, DecodeOptions},
};

/// A [`DecodeBackend`] that runs an [`AssetLoaderLane`] on the calling task.
///
/// The backend yields to the scheduler once before decoding, so a decode is
/// always a suspension point for the caller even though the lane itself is
/// synchronous. No thread is spawned.
pub struct LaneBackend<A: Asset, L: AssetLoaderLane<A>> {
    lane: L,
    _asset: PhantomData<fn() -> A>,
}

impl<A: Asset, L: AssetLoaderLane<A>> LaneBackend<A, L> {
    /// Wraps `lane`.
    pub fn new(lane: L) -> Self {
        Self {
            lane,
            _asset: PhantomData,
        }
    }

    /// The wrapped lane.
    pub fn lane(&self) -> &L {
        &self.lane
    }
}

#[async_trait]
impl<A: Asset, L: AssetLoaderLane<A>> DecodeBackend<A> for LaneBackend<A, L> {
    async fn decode(&self, bytes: Bytes, options: &DecodeOptions) -> Result<A, DecodeError> {
        tokio::task::yield_now().await;

        log::debug!(
            "{} lane '{}' decoding {} bytes",
            self.lane.lane_kind(),
            self.lane.strategy_name(),
            bytes.len()
        );
        self.lane
            .load_with_options(&bytes, options)
            .map_err(DecodeError::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use strata_core::lane::{Lane, LaneKind};

    #[derive(Debug, PartialEq)]
    struct Word(u32);
    impl Asset for Word {}

    struct WordLane;

    impl Lane for WordLane {
        fn strategy_name(&self) -> &'static str {
            "Word"
        }

        fn lane_kind(&self) -> LaneKind {
            LaneKind::Asset
        }
    }

    impl AssetLoaderLane<Word> for WordLane {
        fn load(&self, bytes: &[u8]) -> Result<Word, Box<dyn Error + Send + Sync>> {
            let raw: [u8; 4] = bytes.try_into()?;
            Ok(Word(u32::from_le_bytes(raw)))
        }
    }

    #[tokio::test]
    async fn test_decodes_through_lane() {
        let backend = LaneBackend::new(WordLane);
        let word = backend
            .decode(Bytes::from_static(&[1, 0, 0, 0]), &DecodeOptions::default())
            .await
            .unwrap();
        assert_eq!(word, Word(1));
    }

    #[tokio::test]
    async fn test_lane_error_becomes_rejection() {
        let backend = LaneBackend::new(WordLane);
        let err = backend
            .decode(Bytes::from_static(&[1, 2]), &DecodeOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeError::Rejected(_)));
    }
}
