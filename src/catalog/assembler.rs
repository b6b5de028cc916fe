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
//! # Catalog assembly
//!
//! Every endpoint is resolved against its service and placed under
//! `catalog[region][service type]`. When several endpoints share the region
//! and the service type the one listed last wins.
use std::collections::BTreeMap;

use crate::catalog::CatalogProviderError;
use crate::catalog::backend::CatalogBackend;
use crate::catalog::template::format_url;
use crate::catalog::types::*;
use crate::keystone::ServiceState;

/// Build the catalog from all stored endpoints.
pub(super) async fn build_catalog(
    backend: &dyn CatalogBackend,
    state: &ServiceState,
    values: &BTreeMap<String, String>,
) -> Result<Catalog, CatalogProviderError> {
    let mut catalog = Catalog::new();
    let endpoints = backend
        .list_endpoints(state, &EndpointListParameters::default())
        .await?;

    for endpoint in endpoints {
        let service = backend
            .get_service(state, &endpoint.service_id)
            .await?
            .ok_or_else(|| CatalogProviderError::ServiceNotFound(endpoint.service_id.clone()))?;

        let entry = CatalogEntry {
            id: endpoint.id,
            name: service.name,
            public_url: format_url(endpoint.publicurl.unwrap_or_default(), values)?,
            internal_url: endpoint
                .internalurl
                .map(|url| format_url(url, values))
                .transpose()?,
            admin_url: endpoint
                .adminurl
                .map(|url| format_url(url, values))
                .transpose()?,
        };
        catalog
            .entry(endpoint.region.unwrap_or_default())
            .or_default()
            .insert(service.r#type.unwrap_or_default(), entry);
    }
    Ok(catalog)
}
