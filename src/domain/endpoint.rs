// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Address Resolution
//!
//! A configured address is either a bare database path or `host|path`.
//! Resolution turns it into a connection-ready `ResolvedEndpoint`:
//!
//! - a path naming an existing regular file is used verbatim (local access,
//!   host and port ignored);
//! - anything else is remote: `host:path`, with `:port` appended when a port
//!   is configured.
//!
//! Endpoints are resolved again for every connection attempt, never cached.

use std::fmt;
use std::path::Path;

/// Host used when the address carries no `host|` prefix.
pub const DEFAULT_HOST: &str = "localhost";

const HOST_SEPARATOR: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointMode {
    Local,
    Remote,
}

/// The resolved, connection-ready form of a data-source address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub mode: EndpointMode,
    /// `path` for local files, `host:path[:port]` otherwise.
    pub connection_string: String,
    pub host: String,
    pub path: String,
    /// `None` for local endpoints and for remote ones without a port.
    pub port: Option<String>,
}

impl ResolvedEndpoint {
    /// Resolves `address` (and optional `port`) into an endpoint.
    ///
    /// Performs exactly one filesystem stat. No trimming happens here.
    pub fn resolve(address: &str, port: &str) -> Self {
        let (host, path) = split_address(address);

        if Path::new(path).is_file() {
            return Self {
                mode: EndpointMode::Local,
                connection_string: path.to_string(),
                host: DEFAULT_HOST.to_string(),
                path: path.to_string(),
                port: None,
            };
        }

        let mut connection_string = format!("{}:{}", host, path);
        let port = if port.is_empty() {
            None
        } else {
            connection_string.push(':');
            connection_string.push_str(port);
            Some(port.to_string())
        };

        Self {
            mode: EndpointMode::Remote,
            connection_string,
            host: host.to_string(),
            path: path.to_string(),
            port,
        }
    }

    pub fn is_local(&self) -> bool {
        self.mode == EndpointMode::Local
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.connection_string)
    }
}

/// Splits on the first separator only; the path may contain more of them.
fn split_address(address: &str) -> (&str, &str) {
    address
        .split_once(HOST_SEPARATOR)
        .unwrap_or((DEFAULT_HOST, address))
}
