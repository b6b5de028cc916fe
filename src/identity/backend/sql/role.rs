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
//! Roles.
use sea_orm::entity::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use super::metadata::save;
use crate::db::entity::{prelude::Metadata as DbMetadata, prelude::Role as DbRole, role as db_role};
use crate::error::DbContextExt;
use crate::identity::IdentityProviderError;
use crate::identity::types::*;

impl From<db_role::Model> for Role {
    fn from(value: db_role::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

pub async fn get<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<Option<Role>, IdentityProviderError> {
    Ok(DbRole::find_by_id(id)
        .one(db)
        .await
        .context("fetching role by ID")?
        .map(Into::into))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Role>, IdentityProviderError> {
    Ok(DbRole::find()
        .all(db)
        .await
        .context("listing roles")?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Insert the role. The ID must be already assigned.
pub async fn create(db: &DatabaseConnection, role: RoleCreate) -> Result<Role, IdentityProviderError> {
    let id = role
        .id
        .ok_or_else(|| IdentityProviderError::InvalidInput("role id is not set".into()))?;
    Ok(db_role::ActiveModel {
        id: Set(id),
        name: Set(role.name),
    }
    .insert(db)
    .await
    .context("inserting new role")?
    .into())
}

pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    role: RoleUpdate,
) -> Result<Role, IdentityProviderError> {
    let current = DbRole::find_by_id(id)
        .one(db)
        .await
        .context("fetching role for update")?
        .ok_or_else(|| IdentityProviderError::RoleNotFound(id.to_string()))?;
    let mut entry: db_role::ActiveModel = current.into();
    entry.name = Set(role.name);
    Ok(entry.update(db).await.context("updating role")?.into())
}

/// Delete the role revoking it from every grant first.
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<(), IdentityProviderError> {
    let txn = db
        .begin()
        .await
        .context("starting transaction for deleting role")?;
    let grants = DbMetadata::find()
        .all(&txn)
        .await
        .context("listing metadata for role deletion")?;
    for grant in grants {
        let mut metadata: Metadata = (&grant).try_into()?;
        if !metadata.roles.iter().any(|x| x == id) {
            continue;
        }
        metadata.roles.retain(|x| x != id);
        let (user_id, tenant_id) = (grant.user_id.clone(), grant.tenant_id.clone());
        save(&txn, Some(grant), &user_id, &tenant_id, &metadata).await?;
    }
    let res = DbRole::delete_by_id(id)
        .exec(&txn)
        .await
        .context("deleting role")?;
    if res.rows_affected == 0 {
        txn.rollback().await.context("rolling back role deletion")?;
        return Err(IdentityProviderError::RoleNotFound(id.to_string()));
    }
    txn.commit().await.context("committing role deletion")?;
    Ok(())
}
