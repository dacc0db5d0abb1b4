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

//! Provides the foundational traits and primitive types for Strata's asset system.
//!
//! The key components are:
//! - The [`Asset`] trait: A marker for all types that can be produced by a decoder.
//! - [`AssetHandle`]: the shared, read-only handle every holder of a decoded asset receives.
//! - [`ResourceReference`]: the opaque key used to address raw bytes and logical assets.

mod handle;
mod reference;

pub use handle::*;
pub use reference::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits enforce the guarantees the loading pipeline relies on:
/// - `Send` + `Sync`: a decoded asset is shared between every waiter of a load.
/// - `'static`: the asset can live in the cache for the lifetime of the application.
///
/// # Examples
///
/// ```
/// use strata_core::asset::Asset;
///
/// struct AudioBuffer {
///     samples: Vec<f32>,
/// }
///
/// impl Asset for AudioBuffer {}
/// ```
pub trait Asset: Send + Sync + 'static {}
