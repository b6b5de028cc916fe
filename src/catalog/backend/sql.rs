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
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::error;

use crate::catalog::CatalogProviderError;
use crate::catalog::backend::CatalogBackend;
use crate::catalog::types::*;
use crate::keystone::ServiceState;

mod endpoint;
mod service;

#[derive(Default)]
pub struct SqlBackend {}

#[async_trait]
impl CatalogBackend for SqlBackend {
    /// Create service
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_service(
        &self,
        state: &ServiceState,
        service: ServiceCreate,
    ) -> Result<Service, CatalogProviderError> {
        service::create(&state.db, service).await
    }

    /// Get single service by ID
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Service>, CatalogProviderError> {
        service::get(&state.db, id).await
    }

    /// List Services
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_services(
        &self,
        state: &ServiceState,
        params: &ServiceListParameters,
    ) -> Result<Vec<Service>, CatalogProviderError> {
        service::list(&state.db, params).await
    }

    /// Update service
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn update_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
        service: ServiceUpdate,
    ) -> Result<Service, CatalogProviderError> {
        service::update(&state.db, id, service).await
    }

    /// Delete service with its endpoints
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), CatalogProviderError> {
        service::delete(&state.db, id).await
    }

    /// Create endpoint
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_endpoint(
        &self,
        state: &ServiceState,
        endpoint: EndpointCreate,
    ) -> Result<Endpoint, CatalogProviderError> {
        endpoint::create(&state.db, endpoint).await
    }

    /// Get single endpoint by ID
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Endpoint>, CatalogProviderError> {
        endpoint::get(&state.db, id).await
    }

    /// List Endpoints
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_endpoints(
        &self,
        state: &ServiceState,
        params: &EndpointListParameters,
    ) -> Result<Vec<Endpoint>, CatalogProviderError> {
        endpoint::list(&state.db, params).await
    }

    /// Update endpoint
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn update_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
        endpoint: EndpointUpdate,
    ) -> Result<Endpoint, CatalogProviderError> {
        endpoint::update(&state.db, id, endpoint).await
    }

    /// Delete endpoint
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), CatalogProviderError> {
        endpoint::delete(&state.db, id).await
    }
}

/// Parse the JSON `extra` column.
///
/// Broken documents are logged and treated as empty.
fn parse_extra(extra: Option<&str>, kind: &str, id: &str) -> BTreeMap<String, Value> {
    match extra {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(raw).unwrap_or_else(|e| {
                error!("failed to deserialize {kind} {id} extra: {e}");
                BTreeMap::new()
            })
        }
        _ => BTreeMap::new(),
    }
}

/// Remove the string property from the `extra` map.
fn take_string(extra: &mut BTreeMap<String, Value>, key: &str) -> Option<String> {
    match extra.remove(key) {
        Some(Value::String(val)) => Some(val),
        Some(Value::Null) | None => None,
        Some(other) => {
            extra.insert(key.to_string(), other);
            None
        }
    }
}
