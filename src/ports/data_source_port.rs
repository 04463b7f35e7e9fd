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

//! # Data Source Port
//!
//! This Port defines what it means to "run a query" against a database.
//! The runner does not care whether the adapter speaks to Firebird or to a
//! mock in a test: anything implementing `DataSourcePort` can be plugged in.

use crate::domain::endpoint::ResolvedEndpoint;
use crate::domain::entities::{Credentials, TabularResult};
use crate::domain::errors::Result;

/// `DataSourcePort` opens one connection per call and always releases it
/// before returning, whatever the outcome.
///
/// `Send + Sync` because the runner hands the adapter to its worker thread.
pub trait DataSourcePort: Send + Sync {
    /// Executes `query` and eagerly materializes every column name and row.
    ///
    /// Fails with `ExtractError::Connection` when the connection cannot be
    /// opened and `ExtractError::Query` when the query itself fails.
    fn execute(
        &self,
        endpoint: &ResolvedEndpoint,
        credentials: &Credentials,
        query: &str,
    ) -> Result<TabularResult>;

    /// Opens and immediately closes a connection.
    fn test_connection(&self, endpoint: &ResolvedEndpoint, credentials: &Credentials)
        -> Result<bool>;
}
