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
//! Tenants stored in the database.
use sea_orm::entity::*;
use sea_orm::query::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use super::user::{merge_extra, parse_extra, serialize_extra};
use crate::db::entity::{
    metadata as db_metadata, prelude::Metadata as DbMetadata, prelude::Tenant as DbTenant,
    prelude::UserTenantMembership as DbUserTenantMembership, tenant as db_tenant,
    user_tenant_membership as db_membership,
};
use crate::error::DbContextExt;
use crate::identity::IdentityProviderError;
use crate::identity::types::*;

impl TryFrom<db_tenant::Model> for Tenant {
    type Error = IdentityProviderError;

    fn try_from(value: db_tenant::Model) -> Result<Self, Self::Error> {
        let mut builder = TenantBuilder::default();
        builder.id(value.id.clone());
        builder.name(value.name.clone());
        builder.enabled(value.enabled);
        if let Some(description) = value.description {
            builder.description(description);
        }
        if let Some(extra) = parse_extra(value.extra.as_deref(), "tenant", &value.id) {
            builder.extra(extra);
        }
        Ok(builder.build()?)
    }
}

pub async fn get<C: ConnectionTrait, I: AsRef<str>>(
    db: &C,
    id: I,
) -> Result<Option<Tenant>, IdentityProviderError> {
    DbTenant::find_by_id(id.as_ref())
        .one(db)
        .await
        .context("fetching tenant by ID")?
        .map(TryInto::try_into)
        .transpose()
}

pub async fn get_by_name<N: AsRef<str>>(
    db: &DatabaseConnection,
    name: N,
) -> Result<Option<Tenant>, IdentityProviderError> {
    DbTenant::find()
        .filter(db_tenant::Column::Name.eq(name.as_ref()))
        .one(db)
        .await
        .context("fetching tenant by name")?
        .map(TryInto::try_into)
        .transpose()
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Tenant>, IdentityProviderError> {
    DbTenant::find()
        .all(db)
        .await
        .context("listing tenants")?
        .into_iter()
        .map(TryInto::<Tenant>::try_into)
        .collect()
}

/// Insert the tenant. The ID must be already assigned.
pub async fn create(
    db: &DatabaseConnection,
    tenant: TenantCreate,
) -> Result<Tenant, IdentityProviderError> {
    let id = tenant
        .id
        .ok_or_else(|| IdentityProviderError::InvalidInput("tenant id is not set".into()))?;
    db_tenant::ActiveModel {
        id: Set(id),
        name: Set(tenant.name),
        description: Set(tenant.description),
        enabled: Set(tenant.enabled.unwrap_or(true)),
        extra: Set(serialize_extra(tenant.extra.as_ref())?),
    }
    .insert(db)
    .await
    .context("inserting new tenant")?
    .try_into()
}

pub async fn update<I: AsRef<str>>(
    db: &DatabaseConnection,
    id: I,
    tenant: TenantUpdate,
) -> Result<Tenant, IdentityProviderError> {
    let id = id.as_ref();
    let current = DbTenant::find_by_id(id)
        .one(db)
        .await
        .context("fetching tenant for update")?
        .ok_or_else(|| IdentityProviderError::TenantNotFound(id.to_string()))?;

    let extra = merge_extra(
        parse_extra(current.extra.as_deref(), "tenant", id),
        tenant.extra,
    );
    let mut entry: db_tenant::ActiveModel = current.into();
    if let Some(name) = tenant.name {
        entry.name = Set(name);
    }
    if let Some(description) = tenant.description {
        entry.description = Set(Some(description));
    }
    if let Some(enabled) = tenant.enabled {
        entry.enabled = Set(enabled);
    }
    entry.extra = Set(serialize_extra(extra.as_ref())?);

    entry
        .update(db)
        .await
        .context("updating tenant")?
        .try_into()
}

/// Delete the tenant with the memberships and the metadata.
pub async fn delete<I: AsRef<str>>(db: &DatabaseConnection, id: I) -> Result<(), IdentityProviderError> {
    let id = id.as_ref();
    let txn = db
        .begin()
        .await
        .context("starting transaction for deleting tenant")?;
    DbUserTenantMembership::delete_many()
        .filter(db_membership::Column::TenantId.eq(id))
        .exec(&txn)
        .await
        .context("deleting tenant memberships")?;
    DbMetadata::delete_many()
        .filter(db_metadata::Column::TenantId.eq(id))
        .exec(&txn)
        .await
        .context("deleting tenant metadata")?;
    let res = DbTenant::delete_by_id(id)
        .exec(&txn)
        .await
        .context("deleting tenant")?;
    if res.rows_affected == 0 {
        txn.rollback()
            .await
            .context("rolling back tenant deletion")?;
        return Err(IdentityProviderError::TenantNotFound(id.to_string()));
    }
    txn.commit().await.context("committing tenant deletion")?;
    Ok(())
}
