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
//! # EC2 credentials in the database
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use sea_orm::entity::*;
use sea_orm::query::*;

use crate::db::entity::{ec2_credential as db_credential, prelude::Ec2Credential as DbCredential};
use crate::ec2::Ec2ProviderError;
use crate::ec2::backend::Ec2Backend;
use crate::ec2::types::*;
use crate::error::DbContextExt;
use crate::keystone::ServiceState;

#[derive(Clone, Debug, Default)]
pub struct SqlBackend {}

impl From<db_credential::Model> for Ec2Credential {
    fn from(value: db_credential::Model) -> Self {
        Self {
            access: value.access,
            secret: value.secret,
            user_id: value.user_id,
            tenant_id: value.tenant_id,
        }
    }
}

async fn create(
    db: &DatabaseConnection,
    credential: Ec2CredentialCreate,
) -> Result<Ec2Credential, Ec2ProviderError> {
    let access = credential
        .access
        .ok_or_else(|| Ec2ProviderError::Driver("access key is not set".into()))?;
    if DbCredential::find_by_id(access.as_str())
        .one(db)
        .await
        .context("checking EC2 credential existence")?
        .is_some()
    {
        return Err(Ec2ProviderError::Conflict(format!(
            "EC2 credential {access} already exists"
        )));
    }

    Ok(db_credential::ActiveModel {
        access: Set(access),
        secret: Set(credential.secret),
        user_id: Set(credential.user_id),
        tenant_id: Set(credential.tenant_id),
    }
    .insert(db)
    .await
    .context("inserting EC2 credential")?
    .into())
}

async fn get(db: &DatabaseConnection, access: &str) -> Result<Option<Ec2Credential>, Ec2ProviderError> {
    Ok(DbCredential::find_by_id(access)
        .one(db)
        .await
        .context("fetching EC2 credential")?
        .map(Into::into))
}

async fn list(db: &DatabaseConnection, user_id: &str) -> Result<Vec<Ec2Credential>, Ec2ProviderError> {
    Ok(DbCredential::find()
        .filter(db_credential::Column::UserId.eq(user_id))
        .all(db)
        .await
        .context("listing EC2 credentials of the user")?
        .into_iter()
        .map(Into::into)
        .collect())
}

async fn delete(db: &DatabaseConnection, access: &str) -> Result<(), Ec2ProviderError> {
    let res = DbCredential::delete_by_id(access)
        .exec(db)
        .await
        .context("deleting EC2 credential")?;
    if res.rows_affected == 0 {
        return Err(Ec2ProviderError::CredentialNotFound(access.to_string()));
    }
    Ok(())
}

#[async_trait]
impl Ec2Backend for SqlBackend {
    /// Store the credential
    #[tracing::instrument(level = "debug", skip(self, state, credential))]
    async fn create_credential(
        &self,
        state: &ServiceState,
        credential: Ec2CredentialCreate,
    ) -> Result<Ec2Credential, Ec2ProviderError> {
        create(&state.db, credential).await
    }

    /// Get the credential
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_credential<'a>(
        &self,
        state: &ServiceState,
        access: &'a str,
    ) -> Result<Option<Ec2Credential>, Ec2ProviderError> {
        get(&state.db, access).await
    }

    /// List credentials of the user
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_credentials<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Vec<Ec2Credential>, Ec2ProviderError> {
        list(&state.db, user_id).await
    }

    /// Delete the credential
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_credential<'a>(
        &self,
        state: &ServiceState,
        access: &'a str,
    ) -> Result<(), Ec2ProviderError> {
        delete(&state.db, access).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    use super::*;

    pub(crate) fn get_credential_mock<S: Into<String>>(access: S) -> db_credential::Model {
        db_credential::Model {
            access: access.into(),
            secret: Some("secret".into()),
            user_id: "u1".into(),
            tenant_id: Some("t1".into()),
        }
    }

    #[tokio::test]
    async fn test_create() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<db_credential::Model>::new()])
            .append_query_results([vec![get_credential_mock("a1")]])
            .into_connection();
        let cred = create(
            &db,
            Ec2CredentialCreate {
                access: Some("a1".into()),
                secret: Some("secret".into()),
                user_id: "u1".into(),
                tenant_id: Some("t1".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(cred.access, "a1");
        assert_eq!(cred.tenant_id.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_credential_mock("a1")]])
            .into_connection();
        assert!(matches!(
            create(
                &db,
                Ec2CredentialCreate {
                    access: Some("a1".into()),
                    user_id: "u1".into(),
                    ..Default::default()
                },
            )
            .await,
            Err(Ec2ProviderError::Conflict(..))
        ));
    }

    #[tokio::test]
    async fn test_list() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_credential_mock("a1"), get_credential_mock("a2")]])
            .into_connection();
        let creds = list(&db, "u1").await.unwrap();
        assert_eq!(
            creds.into_iter().map(|x| x.access).collect::<Vec<_>>(),
            vec!["a1", "a2"]
        );
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "ec2_credential"."access", "ec2_credential"."secret", "ec2_credential"."user_id", "ec2_credential"."tenant_id" FROM "ec2_credential" WHERE "ec2_credential"."user_id" = $1"#,
                ["u1".into()]
            ),]
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 0,
                ..Default::default()
            }])
            .into_connection();
        assert!(matches!(
            delete(&db, "a1").await,
            Err(Ec2ProviderError::CredentialNotFound(..))
        ));
    }
}
