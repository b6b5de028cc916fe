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

use crate::catalog::CatalogProviderError;
use crate::db::entity::prelude::Endpoint as DbEndpoint;
use crate::error::DbContextExt;

pub async fn delete<S: AsRef<str>>(db: &DatabaseConnection, id: S) -> Result<(), CatalogProviderError> {
    let res = DbEndpoint::delete_by_id(id.as_ref())
        .exec(db)
        .await
        .context("deleting endpoint")?;
    if res.rows_affected == 0 {
        return Err(CatalogProviderError::EndpointNotFound(
            id.as_ref().to_string(),
        ));
    }
    Ok(())
}
