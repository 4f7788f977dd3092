// Copyright 2025 Chris Custine
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

//! Shared blocking HTTP plumbing for the provider adapters.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use wind_align::SourceError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the client used by every provider, with a per-request timeout.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// GET `url` with `query` and return the body as text.
///
/// Transport failures and non-success statuses map to `SourceError::Network`.
pub fn get_text(client: &Client, url: &str, query: &[(&str, String)]) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(SourceError::network)?;
    debug!("GET {} -> {}", response.url(), response.status());
    response.text().map_err(SourceError::network)
}
