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
//! Tenant memberships of the users.
use sea_orm::DatabaseConnection;
use sea_orm::entity::*;
use sea_orm::query::*;

use super::{tenant, user};
use crate::db::entity::{
    prelude::User as DbUser, prelude::UserTenantMembership as DbUserTenantMembership,
    user as db_user, user_tenant_membership as db_membership,
};
use crate::error::DbContextExt;
use crate::identity::IdentityProviderError;
use crate::identity::types::*;

/// Fail with `UserNotFound` when the user does not exist.
pub(super) async fn ensure_user(db: &DatabaseConnection, user_id: &str) -> Result<(), IdentityProviderError> {
    user::get_main_entry(db, user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| IdentityProviderError::UserNotFound(user_id.to_string()))
}

/// Fail with `TenantNotFound` when the tenant does not exist.
pub(super) async fn ensure_tenant(
    db: &DatabaseConnection,
    tenant_id: &str,
) -> Result<(), IdentityProviderError> {
    tenant::get(db, tenant_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| IdentityProviderError::TenantNotFound(tenant_id.to_string()))
}

/// Add the user to the tenant. Existing membership is left untouched.
pub async fn add(
    db: &DatabaseConnection,
    tenant_id: &str,
    user_id: &str,
) -> Result<(), IdentityProviderError> {
    ensure_tenant(db, tenant_id).await?;
    ensure_user(db, user_id).await?;
    if DbUserTenantMembership::find()
        .filter(db_membership::Column::UserId.eq(user_id))
        .filter(db_membership::Column::TenantId.eq(tenant_id))
        .one(db)
        .await
        .context("checking tenant membership")?
        .is_some()
    {
        return Ok(());
    }
    db_membership::ActiveModel {
        user_id: Set(user_id.to_string()),
        tenant_id: Set(tenant_id.to_string()),
    }
    .insert(db)
    .await
    .context("adding user to tenant")?;
    Ok(())
}

pub async fn remove(
    db: &DatabaseConnection,
    tenant_id: &str,
    user_id: &str,
) -> Result<(), IdentityProviderError> {
    ensure_tenant(db, tenant_id).await?;
    ensure_user(db, user_id).await?;
    let res = DbUserTenantMembership::delete_many()
        .filter(db_membership::Column::UserId.eq(user_id))
        .filter(db_membership::Column::TenantId.eq(tenant_id))
        .exec(db)
        .await
        .context("removing user from tenant")?;
    if res.rows_affected == 0 {
        return Err(IdentityProviderError::MembershipNotFound {
            user_id: user_id.to_string(),
            tenant_id: tenant_id.to_string(),
        });
    }
    Ok(())
}

/// IDs of the tenants of the user.
pub async fn tenants_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<String>, IdentityProviderError> {
    ensure_user(db, user_id).await?;
    Ok(DbUserTenantMembership::find()
        .filter(db_membership::Column::UserId.eq(user_id))
        .all(db)
        .await
        .context("listing tenant memberships of the user")?
        .into_iter()
        .map(|x| x.tenant_id)
        .collect())
}

/// Users that are members of the tenant.
pub async fn tenant_users(
    db: &DatabaseConnection,
    tenant_id: &str,
) -> Result<Vec<UserResponse>, IdentityProviderError> {
    ensure_tenant(db, tenant_id).await?;
    let user_ids: Vec<String> = DbUserTenantMembership::find()
        .filter(db_membership::Column::TenantId.eq(tenant_id))
        .all(db)
        .await
        .context("listing tenant memberships")?
        .into_iter()
        .map(|x| x.user_id)
        .collect();
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    DbUser::find()
        .filter(db_user::Column::Id.is_in(user_ids))
        .all(db)
        .await
        .context("listing tenant users")?
        .into_iter()
        .map(TryInto::<UserResponse>::try_into)
        .collect()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::super::tenant::tests::get_tenant_mock;
    use super::super::user::tests::get_user_mock;
    use super::*;

    #[tokio::test]
    async fn test_tenants_for_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_user_mock("u1")]])
            .append_query_results([vec![
                db_membership::Model {
                    user_id: "u1".into(),
                    tenant_id: "t1".into(),
                },
                db_membership::Model {
                    user_id: "u1".into(),
                    tenant_id: "t2".into(),
                },
            ]])
            .into_connection();
        assert_eq!(tenants_for_user(&db, "u1").await.unwrap(), ["t1", "t2"]);
    }

    #[tokio::test]
    async fn test_tenants_for_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<db_user::Model>::new()])
            .into_connection();
        assert!(matches!(
            tenants_for_user(&db, "u1").await,
            Err(IdentityProviderError::UserNotFound(..))
        ));
    }

    #[tokio::test]
    async fn test_remove_not_member() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_tenant_mock("t1")]])
            .append_query_results([vec![get_user_mock("u1")]])
            .append_exec_results([MockExecResult {
                rows_affected: 0,
                ..Default::default()
            }])
            .into_connection();
        assert!(matches!(
            remove(&db, "t1", "u1").await,
            Err(IdentityProviderError::MembershipNotFound { .. })
        ));
    }
}
