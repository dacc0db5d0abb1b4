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

//! # Strata IO
//!
//! Resolves resource references to raw bytes. The [`ResourceFetcher`] checks a
//! [`PersistedStore`](strata_core::io::PersistedStore) first and falls back to a
//! [`NetworkFetcher`](strata_core::io::NetworkFetcher); the concrete stores and
//! the HTTP transport live here as well.

#![warn(missing_docs)]

mod error;
mod fetcher;
mod http;
pub mod store;

pub use error::StoreError;
pub use fetcher::ResourceFetcher;
pub use http::{FetcherConfig, HttpFetcher};
pub use store::{DirectoryStore, MemoryStore};
