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
use crate::db::entity::{prelude::Service as DbService, service as db_service};
use crate::error::DbContextExt;

/// Insert the service. The ID must be already assigned.
pub async fn create(
    db: &DatabaseConnection,
    service: ServiceCreate,
) -> Result<Service, CatalogProviderError> {
    let id = service
        .id
        .ok_or_else(|| CatalogProviderError::Driver("service id is not set".into()))?;
    let txn = db
        .begin()
        .await
        .context("starting transaction for creating service")?;

    if DbService::find_by_id(id.as_str())
        .one(&txn)
        .await
        .context("checking service existence")?
        .is_some()
    {
        return Err(CatalogProviderError::Conflict(format!(
            "service {id} already exists"
        )));
    }

    let entry = db_service::ActiveModel {
        id: Set(id),
        r#type: Set(service.r#type),
        extra: Set(Some(to_extra(service.name, service.extra)?)),
    }
    .insert(&txn)
    .await
    .context("inserting new service")?;
    txn.commit().await.context("committing service creation")?;

    entry.try_into()
}
