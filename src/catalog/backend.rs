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

pub mod sql;

use crate::catalog::error::CatalogProviderError;
use crate::catalog::types::*;
use crate::keystone::ServiceState;

pub use sql::SqlBackend;

/// Catalog storage.
///
/// Getters return `None` for missing objects. Deletes and updates of the
/// missing objects fail with the corresponding `*NotFound` error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Create service. The ID must be set.
    async fn create_service(
        &self,
        state: &ServiceState,
        service: ServiceCreate,
    ) -> Result<Service, CatalogProviderError>;

    /// Get single service by ID
    async fn get_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Service>, CatalogProviderError>;

    /// List services
    async fn list_services(
        &self,
        state: &ServiceState,
        params: &ServiceListParameters,
    ) -> Result<Vec<Service>, CatalogProviderError>;

    /// Update service
    async fn update_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
        service: ServiceUpdate,
    ) -> Result<Service, CatalogProviderError>;

    /// Delete service and its endpoints in a single transaction.
    async fn delete_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), CatalogProviderError>;

    /// Create endpoint. The ID must be set, the service must exist.
    async fn create_endpoint(
        &self,
        state: &ServiceState,
        endpoint: EndpointCreate,
    ) -> Result<Endpoint, CatalogProviderError>;

    /// Get single endpoint by ID
    async fn get_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Endpoint>, CatalogProviderError>;

    /// List Endpoints
    async fn list_endpoints(
        &self,
        state: &ServiceState,
        params: &EndpointListParameters,
    ) -> Result<Vec<Endpoint>, CatalogProviderError>;

    /// Update endpoint
    async fn update_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
        endpoint: EndpointUpdate,
    ) -> Result<Endpoint, CatalogProviderError>;

    /// Delete endpoint
    async fn delete_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), CatalogProviderError>;
}
