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
use sea_orm::query::*;

use crate::catalog::CatalogProviderError;
use crate::db::entity::{
    endpoint as db_endpoint,
    prelude::{Endpoint as DbEndpoint, Service as DbService},
};
use crate::error::DbContextExt;

/// Delete the service together with all of its endpoints.
pub async fn delete<S: AsRef<str>>(db: &DatabaseConnection, id: S) -> Result<(), CatalogProviderError> {
    let id = id.as_ref();
    let txn = db
        .begin()
        .await
        .context("starting transaction for deleting service")?;

    DbEndpoint::delete_many()
        .filter(db_endpoint::Column::ServiceId.eq(id))
        .exec(&txn)
        .await
        .context("deleting service endpoints")?;
    let res = DbService::delete_by_id(id)
        .exec(&txn)
        .await
        .context("deleting service")?;
    if res.rows_affected == 0 {
        txn.rollback()
            .await
            .context("rolling back service deletion")?;
        return Err(CatalogProviderError::ServiceNotFound(id.to_string()));
    }
    txn.commit().await.context("committing service deletion")?;
    Ok(())
}
