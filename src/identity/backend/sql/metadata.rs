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
//! Per user and tenant metadata holding the role grants.
use sea_orm::entity::*;
use sea_orm::query::*;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use super::membership::{ensure_tenant, ensure_user};
use super::role;
use crate::db::entity::{metadata as db_metadata, prelude::Metadata as DbMetadata};
use crate::error::DbContextExt;
use crate::identity::IdentityProviderError;
use crate::identity::types::*;

impl TryFrom<&db_metadata::Model> for Metadata {
    type Error = IdentityProviderError;

    fn try_from(value: &db_metadata::Model) -> Result<Self, Self::Error> {
        Ok(serde_json::from_str(&value.data)?)
    }
}

async fn find<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    tenant_id: &str,
) -> Result<Option<db_metadata::Model>, IdentityProviderError> {
    Ok(DbMetadata::find()
        .filter(db_metadata::Column::UserId.eq(user_id))
        .filter(db_metadata::Column::TenantId.eq(tenant_id))
        .one(db)
        .await
        .context("fetching metadata")?)
}

/// Store the metadata replacing the current row when present.
pub(super) async fn save<C: ConnectionTrait>(
    db: &C,
    current: Option<db_metadata::Model>,
    user_id: &str,
    tenant_id: &str,
    metadata: &Metadata,
) -> Result<(), IdentityProviderError> {
    let data = serde_json::to_string(metadata)?;
    match current {
        Some(model) => {
            let mut entry: db_metadata::ActiveModel = model.into();
            entry.data = Set(data);
            entry.update(db).await.context("updating metadata")?;
        }
        None => {
            db_metadata::ActiveModel {
                user_id: Set(user_id.to_string()),
                tenant_id: Set(tenant_id.to_string()),
                data: Set(data),
            }
            .insert(db)
            .await
            .context("inserting metadata")?;
        }
    }
    Ok(())
}

pub async fn get<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    tenant_id: &str,
) -> Result<Option<Metadata>, IdentityProviderError> {
    find(db, user_id, tenant_id)
        .await?
        .as_ref()
        .map(TryInto::try_into)
        .transpose()
}

/// Grant the role. Granting the role twice is a conflict.
pub async fn add_role(
    db: &DatabaseConnection,
    user_id: &str,
    tenant_id: &str,
    role_id: &str,
) -> Result<(), IdentityProviderError> {
    ensure_user(db, user_id).await?;
    ensure_tenant(db, tenant_id).await?;
    if role::get(db, role_id).await?.is_none() {
        return Err(IdentityProviderError::RoleNotFound(role_id.to_string()));
    }
    let current = find(db, user_id, tenant_id).await?;
    let mut metadata: Metadata = match &current {
        Some(model) => model.try_into()?,
        None => Metadata::default(),
    };
    if metadata.roles.iter().any(|x| x == role_id) {
        return Err(IdentityProviderError::Conflict(format!(
            "User {user_id} already has role {role_id} in tenant {tenant_id}"
        )));
    }
    metadata.roles.push(role_id.to_string());
    save(db, current, user_id, tenant_id, &metadata).await
}

/// Revoke the role. Revoking the role which is not granted fails with
/// `RoleNotFound`.
pub async fn remove_role(
    db: &DatabaseConnection,
    user_id: &str,
    tenant_id: &str,
    role_id: &str,
) -> Result<(), IdentityProviderError> {
    let current = find(db, user_id, tenant_id).await?;
    let mut metadata: Metadata = match &current {
        Some(model) => model.try_into()?,
        None => Metadata::default(),
    };
    if !metadata.roles.iter().any(|x| x == role_id) {
        return Err(IdentityProviderError::RoleNotFound(role_id.to_string()));
    }
    metadata.roles.retain(|x| x != role_id);
    save(db, current, user_id, tenant_id, &metadata).await
}

/// Role IDs granted to the user on the tenant.
pub async fn roles_for_user_and_tenant(
    db: &DatabaseConnection,
    user_id: &str,
    tenant_id: &str,
) -> Result<Vec<String>, IdentityProviderError> {
    ensure_user(db, user_id).await?;
    ensure_tenant(db, tenant_id).await?;
    Ok(get(db, user_id, tenant_id)
        .await?
        .map(|x| x.roles)
        .unwrap_or_default())
}
