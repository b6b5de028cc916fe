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
use sea_orm::query::*;

use crate::catalog::{CatalogProviderError, types::*};
use crate::db::entity::{prelude::Service as DbService, service as db_service};
use crate::error::DbContextExt;

pub async fn list(
    db: &DatabaseConnection,
    params: &ServiceListParameters,
) -> Result<Vec<Service>, CatalogProviderError> {
    let mut select = DbService::find();

    if let Some(typ) = &params.r#type {
        select = select.filter(db_service::Column::Type.eq(typ));
    }

    select
        .all(db)
        .await
        .context("fetching services")?
        .into_iter()
        .map(TryInto::<Service>::try_into)
        .collect()
}
