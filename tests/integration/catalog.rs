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
//! Catalog provider against the database.
use eyre::Result;
use std::collections::BTreeMap;
use tracing_test::traced_test;

use keystone_ldap_sql::catalog::{CatalogApi, CatalogProviderError, types::*};
use keystone_ldap_sql::keystone::ServiceState;

use crate::common::get_state;

async fn create_service(state: &ServiceState, id: &str, r#type: &str) -> Result<Service> {
    Ok(state
        .provider
        .get_catalog_provider()
        .create_service(
            state,
            ServiceCreate {
                id: Some(id.into()),
                r#type: Some(r#type.into()),
                name: Some(format!("{}-svc", r#type)),
                ..Default::default()
            },
        )
        .await?)
}

async fn create_endpoint(
    state: &ServiceState,
    id: &str,
    service_id: &str,
    publicurl: &str,
) -> Result<Endpoint> {
    Ok(state
        .provider
        .get_catalog_provider()
        .create_endpoint(
            state,
            EndpointCreate {
                id: Some(id.into()),
                region: Some("RegionOne".into()),
                service_id: service_id.into(),
                publicurl: Some(publicurl.into()),
                ..Default::default()
            },
        )
        .await?)
}

#[tokio::test]
#[traced_test]
async fn test_create_list_service() -> Result<()> {
    let state = get_state().await?;
    create_service(&state, "s1", "compute").await?;

    let services = state
        .provider
        .get_catalog_provider()
        .list_services(&state, &ServiceListParameters::default())
        .await?;
    assert_eq!(services.iter().filter(|x| x.id == "s1").count(), 1);
    assert_eq!(services[0].name.as_deref(), Some("compute-svc"));
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_endpoint_missing_service() -> Result<()> {
    let state = get_state().await?;
    let res = create_endpoint(&state, "e1", "missing", "http://localhost").await;
    assert!(matches!(
        res.unwrap_err().downcast_ref::<CatalogProviderError>(),
        Some(CatalogProviderError::ServiceNotFound(..))
    ));
    assert!(
        state
            .provider
            .get_catalog_provider()
            .list_endpoints(&state, &EndpointListParameters::default())
            .await?
            .is_empty()
    );
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_delete_service_cascade() -> Result<()> {
    let state = get_state().await?;
    let catalog = state.provider.get_catalog_provider();
    create_service(&state, "s1", "compute").await?;
    create_service(&state, "s2", "image").await?;
    create_endpoint(&state, "e1", "s1", "http://nova").await?;
    create_endpoint(&state, "e2", "s2", "http://glance").await?;

    assert!(matches!(
        catalog.delete_service(&state, "missing").await,
        Err(CatalogProviderError::ServiceNotFound(..))
    ));
    assert_eq!(
        catalog
            .list_endpoints(&state, &EndpointListParameters::default())
            .await?
            .len(),
        2
    );

    catalog.delete_service(&state, "s1").await?;
    let endpoints = catalog
        .list_endpoints(&state, &EndpointListParameters::default())
        .await?;
    assert_eq!(
        endpoints.into_iter().map(|x| x.id).collect::<Vec<_>>(),
        vec!["e2"]
    );
    assert!(matches!(
        catalog.get_service(&state, "s1").await,
        Err(CatalogProviderError::ServiceNotFound(..))
    ));
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_get_catalog() -> Result<()> {
    let state = get_state().await?;
    create_service(&state, "s1", "object-store").await?;
    create_endpoint(&state, "e1", "s1", "http://{tenant_id}.example.com").await?;

    let catalog = state
        .provider
        .get_catalog_provider()
        .get_catalog(&state, "u1", Some("t1"), &BTreeMap::new())
        .await?;
    let entry = &catalog["RegionOne"]["object-store"];
    assert_eq!(entry.id, "e1");
    assert_eq!(entry.public_url, "http://t1.example.com");
    assert!(entry.admin_url.is_none());
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_get_catalog_last_write_wins() -> Result<()> {
    let state = get_state().await?;
    create_service(&state, "s1", "compute").await?;
    create_endpoint(&state, "e1", "s1", "http://first").await?;
    create_endpoint(&state, "e2", "s1", "http://second").await?;

    let catalog = state
        .provider
        .get_catalog_provider()
        .get_catalog(&state, "u1", None, &BTreeMap::new())
        .await?;
    assert_eq!(catalog["RegionOne"].len(), 1);
    assert_eq!(catalog["RegionOne"]["compute"].id, "e2");
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_get_catalog_malformed() -> Result<()> {
    let state = get_state().await?;
    create_service(&state, "s1", "compute").await?;
    create_endpoint(&state, "e1", "s1", "http://{unknown}/v2").await?;

    assert!(matches!(
        state
            .provider
            .get_catalog_provider()
            .get_catalog(&state, "u1", Some("t1"), &BTreeMap::new())
            .await,
        Err(CatalogProviderError::MalformedEndpoint(..))
    ));
    Ok(())
}
