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
use std::collections::BTreeMap;

use crate::catalog::CatalogProviderError;
use crate::catalog::types::{catalog::*, endpoint::*, service::*};
use crate::keystone::ServiceState;

/// Catalog API.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Create a service.
    async fn create_service(
        &self,
        state: &ServiceState,
        service: ServiceCreate,
    ) -> Result<Service, CatalogProviderError>;

    /// Get a single service.
    async fn get_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Service, CatalogProviderError>;

    /// List services.
    async fn list_services(
        &self,
        state: &ServiceState,
        params: &ServiceListParameters,
    ) -> Result<Vec<Service>, CatalogProviderError>;

    /// Update the service.
    async fn update_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
        service: ServiceUpdate,
    ) -> Result<Service, CatalogProviderError>;

    /// Delete the service together with all its endpoints.
    async fn delete_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), CatalogProviderError>;

    /// Create an endpoint of the existing service.
    async fn create_endpoint(
        &self,
        state: &ServiceState,
        endpoint: EndpointCreate,
    ) -> Result<Endpoint, CatalogProviderError>;

    /// Get a single endpoint.
    async fn get_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Endpoint, CatalogProviderError>;

    /// List endpoints.
    async fn list_endpoints(
        &self,
        state: &ServiceState,
        params: &EndpointListParameters,
    ) -> Result<Vec<Endpoint>, CatalogProviderError>;

    /// Update the endpoint.
    async fn update_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
        endpoint: EndpointUpdate,
    ) -> Result<Endpoint, CatalogProviderError>;

    /// Delete the endpoint.
    async fn delete_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), CatalogProviderError>;

    /// Build the catalog for the user.
    ///
    /// URL templates of every endpoint are expanded with the configuration
    /// values, `extra`, `tenant_id` and `user_id`.
    async fn get_catalog<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: Option<&'a str>,
        extra: &'a BTreeMap<String, String>,
    ) -> Result<Catalog, CatalogProviderError>;
}
