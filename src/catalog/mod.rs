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
//! # Catalog provider
//!
//! Catalog provider takes care of the services and their endpoints and
//! returns the catalog the authenticated user is able to use.
//!
//! Following Keystone concepts are covered:
//!
//! ## Endpoint
//!
//! A network-accessible address, usually a URL, through which you can access a
//! service. Stored URLs are templates: `{tenant_id}` (or the legacy
//! `$(tenant_id)s`) is replaced with the tenant of the requesting user while
//! assembling the catalog.
//!
//! ## Service
//!
//! An OpenStack service, such as Compute (nova), Object Storage (swift), or
//! Image service (glance), that provides one or more endpoints through which
//! users can access resources and perform operations.
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

mod assembler;
pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod template;
pub mod types;

use crate::catalog::backend::{CatalogBackend, SqlBackend};
use crate::config::Config;
use crate::keystone::ServiceState;
use crate::plugin_manager::PluginManager;
pub use error::CatalogProviderError;

#[cfg(test)]
pub use mock::MockCatalogProvider;

pub use types::*;

pub struct CatalogProvider {
    backend_driver: Arc<dyn CatalogBackend>,
}

impl CatalogProvider {
    pub fn new(
        config: &Config,
        plugin_manager: &PluginManager,
    ) -> Result<Self, CatalogProviderError> {
        let backend_driver = if let Some(driver) =
            plugin_manager.get_catalog_backend(config.catalog.driver.clone())
        {
            driver.clone()
        } else {
            match config.catalog.driver.as_str() {
                "sql" => Arc::new(SqlBackend::default()),
                _ => {
                    return Err(CatalogProviderError::UnsupportedDriver(
                        config.catalog.driver.clone(),
                    ));
                }
            }
        };
        Ok(Self { backend_driver })
    }
}

#[async_trait]
impl CatalogApi for CatalogProvider {
    /// Create service
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn create_service(
        &self,
        state: &ServiceState,
        service: ServiceCreate,
    ) -> Result<Service, CatalogProviderError> {
        let mut new = service;
        if new.id.is_none() {
            new.id = Some(Uuid::new_v4().simple().to_string());
        }
        new.validate()?;
        self.backend_driver.create_service(state, new).await
    }

    /// Get single service by ID
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Service, CatalogProviderError> {
        self.backend_driver
            .get_service(state, id)
            .await?
            .ok_or_else(|| CatalogProviderError::ServiceNotFound(id.to_string()))
    }

    /// List services
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn list_services(
        &self,
        state: &ServiceState,
        params: &ServiceListParameters,
    ) -> Result<Vec<Service>, CatalogProviderError> {
        self.backend_driver.list_services(state, params).await
    }

    /// Update service
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn update_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
        service: ServiceUpdate,
    ) -> Result<Service, CatalogProviderError> {
        service.validate()?;
        self.backend_driver.update_service(state, id, service).await
    }

    /// Delete service with all its endpoints
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_service<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), CatalogProviderError> {
        self.backend_driver.delete_service(state, id).await
    }

    /// Create endpoint
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn create_endpoint(
        &self,
        state: &ServiceState,
        endpoint: EndpointCreate,
    ) -> Result<Endpoint, CatalogProviderError> {
        let mut new = endpoint;
        if new.id.is_none() {
            new.id = Some(Uuid::new_v4().simple().to_string());
        }
        new.validate()?;
        self.backend_driver.create_endpoint(state, new).await
    }

    /// Get single endpoint by ID
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Endpoint, CatalogProviderError> {
        self.backend_driver
            .get_endpoint(state, id)
            .await?
            .ok_or_else(|| CatalogProviderError::EndpointNotFound(id.to_string()))
    }

    /// List endpoints
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn list_endpoints(
        &self,
        state: &ServiceState,
        params: &EndpointListParameters,
    ) -> Result<Vec<Endpoint>, CatalogProviderError> {
        params.validate()?;
        self.backend_driver.list_endpoints(state, params).await
    }

    /// Update endpoint
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn update_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
        endpoint: EndpointUpdate,
    ) -> Result<Endpoint, CatalogProviderError> {
        endpoint.validate()?;
        self.backend_driver.update_endpoint(state, id, endpoint).await
    }

    /// Delete endpoint
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_endpoint<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), CatalogProviderError> {
        self.backend_driver.delete_endpoint(state, id).await
    }

    /// Get catalog
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_catalog<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: Option<&'a str>,
        extra: &'a BTreeMap<String, String>,
    ) -> Result<Catalog, CatalogProviderError> {
        let mut values = state.config.default.template_values();
        values.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        values.insert("tenant_id".into(), tenant_id.unwrap_or_default().into());
        values.insert("user_id".into(), user_id.into());

        assembler::build_catalog(self.backend_driver.as_ref(), state, &values).await
    }
}
