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

//! HTTP transport for resources that are not persisted locally.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use strata_core::io::NetworkFetcher;

/// Configuration for the [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("strata/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A [`NetworkFetcher`] issuing binary GET requests with `reqwest`.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from `config`.
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_once(&self, url: &str) -> Result<Bytes, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.bytes().await
    }
}

#[async_trait]
impl NetworkFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Option<Bytes> {
        match self.fetch_once(url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("Request for '{}' failed: {}", url, e);
                None
            }
        }
    }
}
