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

//! # Lane Abstraction
//!
//! A **Lane** is a reusable, swappable processing strategy. Agents hold lanes
//! and route work to them; each lane encapsulates one approach to a domain task
//! (decoding WAV with `hound`, probing containers with `symphonia`, ...).
//!
//! Domain-specific traits extend the identity provided here, e.g.
//! `AssetLoaderLane<A>` in the lanes crate.

use std::fmt;

/// Classification of lane types, used for routing and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Asset decoding (textures, generic payloads).
    Asset,
    /// Audio decoding.
    Audio,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Asset => write!(f, "Asset"),
            LaneKind::Audio => write!(f, "Audio"),
        }
    }
}

/// The identity shared by all lanes.
pub trait Lane: Send + Sync {
    /// A short, stable name of the strategy, used in logs.
    fn strategy_name(&self) -> &'static str;

    /// The kind of work this lane performs.
    fn lane_kind(&self) -> LaneKind;
}
