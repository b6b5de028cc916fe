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

use sea_orm::DatabaseConnection;
use sea_orm::TransactionTrait;
use sea_orm::entity::*;

use super::to_extra;
use crate::catalog::{CatalogProviderError, types::*};
use crate::db::entity::{
    endpoint as db_endpoint,
    prelude::{Endpoint as DbEndpoint, Service as DbService},
};
use crate::error::DbContextExt;

/// Insert the endpoint. The ID must be already assigned and the service must
/// exist.
pub async fn create(
    db: &DatabaseConnection,
    endpoint: EndpointCreate,
) -> Result<Endpoint, CatalogProviderError> {
    let id = endpoint
        .id
        .ok_or_else(|| CatalogProviderError::Driver("endpoint id is not set".into()))?;
    let txn = db
        .begin()
        .await
        .context("starting transaction for creating endpoint")?;

    if DbEndpoint::find_by_id(id.as_str())
        .one(&txn)
        .await
        .context("checking endpoint existence")?
        .is_some()
    {
        return Err(CatalogProviderError::Conflict(format!(
            "endpoint {id} already exists"
        )));
    }
    if DbService::find_by_id(endpoint.service_id.as_str())
        .one(&txn)
        .await
        .context("fetching endpoint service")?
        .is_none()
    {
        return Err(CatalogProviderError::ServiceNotFound(endpoint.service_id));
    }

    let extra = to_extra(
        [endpoint.publicurl, endpoint.internalurl, endpoint.adminurl],
        endpoint.extra,
    )?;
    let entry = db_endpoint::ActiveModel {
        id: Set(id),
        region: Set(endpoint.region),
        service_id: Set(endpoint.service_id),
        extra: Set(Some(extra)),
    }
    .insert(&txn)
    .await
    .context("inserting new endpoint")?;
    txn.commit().await.context("committing endpoint creation")?;

    entry.try_into()
}
