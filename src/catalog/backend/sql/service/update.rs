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
use sea_orm::entity::*;

use super::to_extra;
use crate::catalog::backend::sql::{parse_extra, take_string};
use crate::catalog::{CatalogProviderError, types::*};
use crate::db::entity::{prelude::Service as DbService, service as db_service};
use crate::error::DbContextExt;

/// Update the service. Properties of `extra` are merged into the stored ones.
pub async fn update<S: AsRef<str>>(
    db: &DatabaseConnection,
    id: S,
    service: ServiceUpdate,
) -> Result<Service, CatalogProviderError> {
    let id = id.as_ref();
    let current = DbService::find_by_id(id)
        .one(db)
        .await
        .context("fetching service for update")?
        .ok_or_else(|| CatalogProviderError::ServiceNotFound(id.to_string()))?;

    let mut extra = parse_extra(current.extra.as_deref(), "service", id);
    let name = service.name.or_else(|| take_string(&mut extra, "name"));
    extra.extend(service.extra);

    let mut entry: db_service::ActiveModel = current.into();
    if let Some(typ) = service.r#type {
        entry.r#type = Set(Some(typ));
    }
    entry.extra = Set(Some(to_extra(name, extra)?));

    entry
        .update(db)
        .await
        .context("updating service")?
        .try_into()
}
