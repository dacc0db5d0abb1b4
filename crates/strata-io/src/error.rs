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

//! Errors raised when writing to a persisted store.

use std::path::PathBuf;

/// An error from a [`DirectoryStore`](crate::DirectoryStore) write or setup.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store directory or an entry file could not be accessed.
    #[error("store I/O failed at {path:?}: {source}")]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An entry could not be serialized.
    #[error("failed to serialize store entry: {0}")]
    Json(#[from] serde_json::Error),
}
