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
//! Users stored in the database.
use sea_orm::entity::*;
use sea_orm::query::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::Value;
use tracing::error;

use crate::config::Config;
use crate::db::entity::{
    metadata as db_metadata, prelude::Metadata as DbMetadata, prelude::User as DbUser,
    prelude::UserTenantMembership as DbUserTenantMembership, user as db_user,
    user_tenant_membership as db_membership,
};
use crate::error::DbContextExt;
use crate::identity::IdentityProviderError;
use crate::identity::password_hashing;
use crate::identity::types::*;

impl TryFrom<db_user::Model> for UserResponse {
    type Error = IdentityProviderError;

    fn try_from(value: db_user::Model) -> Result<Self, Self::Error> {
        let mut builder = UserResponseBuilder::default();
        builder.id(value.id.clone());
        builder.name(value.name.clone());
        builder.enabled(value.enabled);
        if let Some(extra) = parse_extra(value.extra.as_deref(), "user", &value.id) {
            builder.extra(extra);
        }
        Ok(builder.build()?)
    }
}

/// Parse the JSON `extra` column. Broken documents are logged and ignored.
pub(super) fn parse_extra(extra: Option<&str>, kind: &str, id: &str) -> Option<Value> {
    match extra {
        Some(raw) if !raw.trim().is_empty() => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Null) => None,
            Ok(val) => Some(val),
            Err(e) => {
                error!("failed to deserialize {kind} {id} extra: {e}");
                None
            }
        },
        _ => None,
    }
}

/// Merge the properties of the `update` object into `current`.
///
/// Anything but two objects results in the `update` replacing `current`.
pub(super) fn merge_extra(current: Option<Value>, update: Option<Value>) -> Option<Value> {
    match (current, update) {
        (Some(Value::Object(mut current)), Some(Value::Object(update))) => {
            current.extend(update);
            Some(Value::Object(current))
        }
        (current, None) => current,
        (_, update) => update,
    }
}

pub(super) fn serialize_extra(extra: Option<&Value>) -> Result<Option<String>, IdentityProviderError> {
    Ok(extra.map(serde_json::to_string).transpose()?)
}

/// Raw user row including the password hash.
pub async fn get_main_entry<C: ConnectionTrait, I: AsRef<str>>(
    db: &C,
    id: I,
) -> Result<Option<db_user::Model>, IdentityProviderError> {
    Ok(DbUser::find_by_id(id.as_ref())
        .one(db)
        .await
        .context("fetching user by ID")?)
}

pub async fn get<C: ConnectionTrait, I: AsRef<str>>(
    db: &C,
    id: I,
) -> Result<Option<UserResponse>, IdentityProviderError> {
    get_main_entry(db, id)
        .await?
        .map(TryInto::try_into)
        .transpose()
}

pub async fn get_by_name<N: AsRef<str>>(
    db: &DatabaseConnection,
    name: N,
) -> Result<Option<UserResponse>, IdentityProviderError> {
    DbUser::find()
        .filter(db_user::Column::Name.eq(name.as_ref()))
        .one(db)
        .await
        .context("fetching user by name")?
        .map(TryInto::try_into)
        .transpose()
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<UserResponse>, IdentityProviderError> {
    DbUser::find()
        .all(db)
        .await
        .context("listing users")?
        .into_iter()
        .map(TryInto::<UserResponse>::try_into)
        .collect()
}

/// Insert the user. The ID must be already assigned.
pub async fn create(
    conf: &Config,
    db: &DatabaseConnection,
    user: UserCreate,
) -> Result<UserResponse, IdentityProviderError> {
    let id = user
        .id
        .ok_or_else(|| IdentityProviderError::InvalidInput("user id is not set".into()))?;
    let password = match &user.password {
        Some(password) => Some(password_hashing::hash_password(conf, password).await?),
        None => None,
    };
    db_user::ActiveModel {
        id: Set(id),
        name: Set(user.name),
        password: Set(password),
        enabled: Set(user.enabled.unwrap_or(true)),
        extra: Set(serialize_extra(user.extra.as_ref())?),
    }
    .insert(db)
    .await
    .context("inserting new user")?
    .try_into()
}

/// Update the user. A new password is hashed, `extra` is merged.
pub async fn update<I: AsRef<str>>(
    conf: &Config,
    db: &DatabaseConnection,
    id: I,
    user: UserUpdate,
) -> Result<UserResponse, IdentityProviderError> {
    let id = id.as_ref();
    if let Some(new_id) = &user.id
        && new_id != id
    {
        return Err(IdentityProviderError::InvalidInput(
            "Cannot change user ID".into(),
        ));
    }
    let current = get_main_entry(db, id)
        .await?
        .ok_or_else(|| IdentityProviderError::UserNotFound(id.to_string()))?;

    let extra = merge_extra(
        parse_extra(current.extra.as_deref(), "user", id),
        user.extra,
    );
    let mut entry: db_user::ActiveModel = current.into();
    if let Some(name) = user.name {
        entry.name = Set(name);
    }
    if let Some(enabled) = user.enabled {
        entry.enabled = Set(enabled);
    }
    if let Some(password) = &user.password {
        entry.password = Set(Some(password_hashing::hash_password(conf, password).await?));
    }
    entry.extra = Set(serialize_extra(extra.as_ref())?);

    entry
        .update(db)
        .await
        .context("updating user")?
        .try_into()
}

/// Delete the user with the tenant memberships and the metadata.
pub async fn delete<I: AsRef<str>>(db: &DatabaseConnection, id: I) -> Result<(), IdentityProviderError> {
    let id = id.as_ref();
    let txn = db
        .begin()
        .await
        .context("starting transaction for deleting user")?;
    DbUserTenantMembership::delete_many()
        .filter(db_membership::Column::UserId.eq(id))
        .exec(&txn)
        .await
        .context("deleting user tenant memberships")?;
    DbMetadata::delete_many()
        .filter(db_metadata::Column::UserId.eq(id))
        .exec(&txn)
        .await
        .context("deleting user metadata")?;
    let res = DbUser::delete_by_id(id)
        .exec(&txn)
        .await
        .context("deleting user")?;
    if res.rows_affected == 0 {
        txn.rollback().await.context("rolling back user deletion")?;
        return Err(IdentityProviderError::UserNotFound(id.to_string()));
    }
    txn.commit().await.context("committing user deletion")?;
    Ok(())
}

#[cfg(test)]
pub(super) mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;

    pub(in super::super) fn get_user_mock<S: Into<String>>(id: S) -> db_user::Model {
        db_user::Model {
            id: id.into(),
            name: "jdoe".into(),
            password: Some("$2b$04$hash".into()),
            enabled: true,
            extra: Some(r#"{"email": "jdoe@example.com"}"#.into()),
        }
    }

    #[tokio::test]
    async fn test_get() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_user_mock("1")]])
            .into_connection();
        let user = get(&db, "1").await.unwrap().unwrap();
        assert_eq!(
            user,
            UserResponse {
                id: "1".into(),
                name: "jdoe".into(),
                enabled: true,
                extra: Some(json!({"email": "jdoe@example.com"})),
            }
        );
        assert!(!serde_json::to_string(&user).unwrap().contains("hash"));
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "user"."id", "user"."name", "user"."password", "user"."enabled", "user"."extra" FROM "user" WHERE "user"."id" = $1 LIMIT $2"#,
                ["1".into(), 1u64.into()]
            ),]
        );
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<db_user::Model>::new()])
            .into_connection();
        assert!(get_by_name(&db, "missing").await.unwrap().is_none());
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "user"."id", "user"."name", "user"."password", "user"."enabled", "user"."extra" FROM "user" WHERE "user"."name" = $1 LIMIT $2"#,
                ["missing".into(), 1u64.into()]
            ),]
        );
    }

    #[test]
    #[traced_test]
    fn test_broken_extra() {
        let mut model = get_user_mock("1");
        model.extra = Some("{not json".into());
        let user: UserResponse = model.try_into().unwrap();
        assert!(user.extra.is_none());
        assert!(logs_contain("failed to deserialize user 1 extra"));
    }

    #[test]
    fn test_merge_extra() {
        assert_eq!(
            merge_extra(Some(json!({"a": 1, "b": 2})), Some(json!({"b": 3, "c": 4}))),
            Some(json!({"a": 1, "b": 3, "c": 4}))
        );
        assert_eq!(merge_extra(Some(json!({"a": 1})), None), Some(json!({"a": 1})));
        assert_eq!(merge_extra(None, Some(json!([1]))), Some(json!([1])));
    }

    #[tokio::test]
    async fn test_update_id_change() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let res = update(
            &Config::default(),
            &db,
            "1",
            UserUpdate {
                id: Some("2".into()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(res, Err(IdentityProviderError::InvalidInput(..))));
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    rows_affected: 1,
                    ..Default::default()
                },
                MockExecResult {
                    rows_affected: 1,
                    ..Default::default()
                },
                MockExecResult {
                    rows_affected: 0,
                    ..Default::default()
                },
            ])
            .into_connection();
        assert!(matches!(
            delete(&db, "1").await,
            Err(IdentityProviderError::UserNotFound(id)) if id == "1"
        ));
    }
}
