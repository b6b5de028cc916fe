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

use super::{URL_KEYS, to_extra};
use crate::catalog::backend::sql::{parse_extra, take_string};
use crate::catalog::{CatalogProviderError, types::*};
use crate::db::entity::{
    endpoint as db_endpoint,
    prelude::{Endpoint as DbEndpoint, Service as DbService},
};
use crate::error::DbContextExt;

/// Update the endpoint. Properties of `extra` are merged into the stored ones.
pub async fn update<S: AsRef<str>>(
    db: &DatabaseConnection,
    id: S,
    endpoint: EndpointUpdate,
) -> Result<Endpoint, CatalogProviderError> {
    let id = id.as_ref();
    let current = DbEndpoint::find_by_id(id)
        .one(db)
        .await
        .context("fetching endpoint for update")?
        .ok_or_else(|| CatalogProviderError::EndpointNotFound(id.to_string()))?;

    let mut extra = parse_extra(current.extra.as_deref(), "endpoint", id);
    let stored = URL_KEYS.map(|key| take_string(&mut extra, key));
    let urls = [endpoint.publicurl, endpoint.internalurl, endpoint.adminurl];
    let [publicurl, internalurl, adminurl] = stored;
    let [new_public, new_internal, new_admin] = urls;
    extra.extend(endpoint.extra);

    let mut entry: db_endpoint::ActiveModel = current.into();
    if let Some(service_id) = endpoint.service_id {
        if DbService::find_by_id(service_id.as_str())
            .one(db)
            .await
            .context("fetching endpoint service")?
            .is_none()
        {
            return Err(CatalogProviderError::ServiceNotFound(service_id));
        }
        entry.service_id = Set(service_id);
    }
    if let Some(region) = endpoint.region {
        entry.region = Set(Some(region));
    }
    entry.extra = Set(Some(to_extra(
        [
            new_public.or(publicurl),
            new_internal.or(internalurl),
            new_admin.or(adminurl),
        ],
        extra,
    )?));

    entry
        .update(db)
        .await
        .context("updating endpoint")?
        .try_into()
}
