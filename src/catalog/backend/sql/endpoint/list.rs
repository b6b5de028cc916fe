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
use crate::db::entity::{endpoint as db_endpoint, prelude::Endpoint as DbEndpoint};
use crate::error::DbContextExt;

pub async fn list(
    db: &DatabaseConnection,
    params: &EndpointListParameters,
) -> Result<Vec<Endpoint>, CatalogProviderError> {
    let mut select = DbEndpoint::find();

    if let Some(val) = &params.service_id {
        select = select.filter(db_endpoint::Column::ServiceId.eq(val));
    }
    if let Some(val) = &params.region {
        select = select.filter(db_endpoint::Column::Region.eq(val));
    }

    select
        .all(db)
        .await
        .context("fetching endpoints")?
        .into_iter()
        .map(TryInto::<Endpoint>::try_into)
        .collect()
}
