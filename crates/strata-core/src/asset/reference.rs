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

use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

/// An opaque key identifying either raw bytes or a logical asset.
///
/// References are compared by value; the loading pipeline never interprets
/// them beyond prefixing a resource folder when going to the network and
/// extracting an extension hint for decoders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceReference(String);

impl ResourceReference {
    /// Creates a reference from any string-like key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercase file extension of the key, if it has one.
    ///
    /// ```
    /// use strata_core::ResourceReference;
    ///
    /// assert_eq!(ResourceReference::new("sfx/boom.OGG").extension().as_deref(), Some("ogg"));
    /// assert_eq!(ResourceReference::new("sfx/boom").extension(), None);
    /// ```
    pub fn extension(&self) -> Option<String> {
        let file = self.0.rsplit('/').next()?;
        let (stem, ext) = file.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceReference {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ResourceReference {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for ResourceReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResourceReference {
    fn borrow(&self) -> &str {
        &self.0
    }
}
