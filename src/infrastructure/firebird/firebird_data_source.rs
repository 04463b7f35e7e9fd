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

//! Infrastructure adapter executing queries against Firebird.
//!
//! Uses the pure-Rust wire client from `rsfbclient`, so no native `fbclient`
//! library is needed at build or run time. Local endpoints are reached through
//! the server on `localhost` with the file path as database name.

use crate::domain::endpoint::ResolvedEndpoint;
use crate::domain::entities::{Credentials, TabularResult, Value};
use crate::domain::errors::{ExtractError, Result};
use crate::ports::data_source_port::DataSourcePort;
use log::{debug, warn};
use rsfbclient::prelude::*;
use rsfbclient::{Connection, Row, SqlType};
use rsfbclient_core::FirebirdClient;

/// Concrete implementation of `DataSourcePort` for Firebird.
///
/// Stateless: each call opens its own connection and closes it before
/// returning, so there is nothing to go stale between cycles.
#[derive(Debug, Default, Clone)]
pub struct FirebirdDataSource;

impl FirebirdDataSource {
    pub fn new() -> Self {
        Self
    }

    fn connection_error(endpoint: &ResolvedEndpoint, reason: impl ToString) -> ExtractError {
        ExtractError::Connection {
            endpoint: endpoint.connection_string.clone(),
            reason: reason.to_string(),
        }
    }

    fn parse_port(endpoint: &ResolvedEndpoint) -> Result<Option<u16>> {
        match endpoint.port.as_deref() {
            None => Ok(None),
            Some(p) => p
                .trim()
                .parse::<u16>()
                .map(Some)
                .map_err(|_| Self::connection_error(endpoint, format!("invalid port '{}'", p))),
        }
    }

    /// Opens a fresh connection; the caller owns it and must close it.
    fn connect(
        endpoint: &ResolvedEndpoint,
        credentials: &Credentials,
    ) -> Result<Connection<impl FirebirdClient>> {
        let port = Self::parse_port(endpoint)?;

        let mut builder = rsfbclient::builder_pure_rust();
        builder
            .host(endpoint.host.as_str())
            .db_name(endpoint.path.as_str())
            .user(credentials.user.as_str())
            .pass(credentials.password.as_str());
        if let Some(p) = port {
            builder.port(p);
        }

        debug!("Opening connection to {}", endpoint);
        builder
            .connect()
            .map_err(|e| Self::connection_error(endpoint, e))
    }

    /// Converts one driver value into the domain representation.
    fn to_value(sql: SqlType) -> Value {
        match sql {
            SqlType::Null => Value::Null,
            SqlType::Integer(i) => Value::Integer(i),
            SqlType::Floating(f) => Value::Float(f),
            SqlType::Text(s) => Value::Text(s),
            SqlType::Boolean(b) => Value::Boolean(b),
            SqlType::Timestamp(ts) => Value::Timestamp(ts),
            SqlType::Binary(bytes) => Value::Binary(bytes),
        }
    }

    /// Splits driver rows into column names (taken from the first row) and
    /// values. An empty result therefore has no column names either.
    fn into_tabular(rows: Vec<Row>) -> TabularResult {
        let columns = rows
            .first()
            .map(|r| r.cols.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default();

        let data = rows
            .into_iter()
            .map(|r| r.cols.into_iter().map(|c| Self::to_value(c.value)).collect())
            .collect();

        TabularResult::new(columns, data)
    }
}

impl DataSourcePort for FirebirdDataSource {
    fn execute(
        &self,
        endpoint: &ResolvedEndpoint,
        credentials: &Credentials,
        query: &str,
    ) -> Result<TabularResult> {
        let mut conn = Self::connect(endpoint, credentials)?;

        let outcome: std::result::Result<Vec<Row>, _> = conn.query(query, ());

        // Released on every path, including a failed query.
        if let Err(e) = conn.close() {
            warn!("Failed to close connection to {}: {}", endpoint, e);
        }

        let rows = outcome.map_err(|e| ExtractError::Query(e.to_string()))?;
        Ok(Self::into_tabular(rows))
    }

    fn test_connection(
        &self,
        endpoint: &ResolvedEndpoint,
        credentials: &Credentials,
    ) -> Result<bool> {
        let conn = Self::connect(endpoint, credentials)?;
        conn.close().map_err(|e| Self::connection_error(endpoint, e))?;
        Ok(true)
    }
}
