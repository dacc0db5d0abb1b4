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

/// An error raised while refreshing a logical asset from its config store.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The agent was built without a config store.
    #[error("no config store is attached to the asset agent")]
    NoStore,
    /// The stored document does not describe a sound.
    #[error("malformed sound config for '{reference}': {source}")]
    Malformed {
        /// The logical asset whose config was read.
        reference: String,
        /// The deserialization failure.
        #[source]
        source: serde_json::Error,
    },
}
