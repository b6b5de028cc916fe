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
//! # LDAP federated EC2 credentials
//!
//! Credentials of the directory users are kept in the directory under the
//! `ec2_*` mapping, the rest in the database. The directory credential is
//! owned by the entry it was found under and is scoped to the default tenant.
//!
//! Lookup by the access key checks the directory before the database. Listing
//! the credentials of a directory user (identified by the DN) only returns the
//! directory credential, the database is not consulted.
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::directory::{DirectoryApi, DirectoryClient, DirectoryRecord, valid_dn};
use crate::ec2::Ec2ProviderError;
use crate::ec2::backend::{Ec2Backend, SqlBackend};
use crate::ec2::types::*;
use crate::identity::{IdentityApi, IdentityProviderError};
use crate::keystone::ServiceState;

pub struct LdapSqlBackend {
    sql: SqlBackend,
    credentials: Arc<dyn DirectoryApi>,
    default_tenant: Option<String>,
}

impl LdapSqlBackend {
    pub fn new(config: &Config) -> Self {
        Self::with_directory(
            config,
            Arc::new(DirectoryClient::new(&config.ldap, config.ldap.ec2())),
        )
    }

    pub fn with_directory(config: &Config, credentials: Arc<dyn DirectoryApi>) -> Self {
        Self {
            sql: SqlBackend::default(),
            credentials,
            default_tenant: config.ldap.default_tenant.clone(),
        }
    }

    /// Convert the directory entry into the credential owned by the entry.
    async fn credential_from_record(
        &self,
        state: &ServiceState,
        record: DirectoryRecord,
    ) -> Result<Ec2Credential, Ec2ProviderError> {
        let tenant_id = match &self.default_tenant {
            Some(name) => match state
                .provider
                .get_identity_provider()
                .get_tenant_by_name(state, name)
                .await
            {
                Ok(tenant) => Some(tenant.id),
                Err(IdentityProviderError::TenantNotFound(_)) => {
                    debug!("default tenant {name} does not exist");
                    None
                }
                Err(err) => return Err(err.into()),
            },
            None => None,
        };
        Ok(Ec2Credential {
            access: record.name.clone().unwrap_or_else(|| record.dn.clone()),
            secret: record.get_string("secret"),
            user_id: record.dn,
            tenant_id,
        })
    }
}

#[async_trait]
impl Ec2Backend for LdapSqlBackend {
    /// Store the credential
    #[tracing::instrument(level = "debug", skip(self, state, credential))]
    async fn create_credential(
        &self,
        state: &ServiceState,
        credential: Ec2CredentialCreate,
    ) -> Result<Ec2Credential, Ec2ProviderError> {
        self.sql.create_credential(state, credential).await
    }

    /// Get the credential from the directory or the database
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_credential<'a>(
        &self,
        state: &ServiceState,
        access: &'a str,
    ) -> Result<Option<Ec2Credential>, Ec2ProviderError> {
        if let Some(record) = self.credentials.get_by_name(access).await {
            return Ok(Some(self.credential_from_record(state, record).await?));
        }
        self.sql.get_credential(state, access).await
    }

    /// List credentials of the user
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_credentials<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Vec<Ec2Credential>, Ec2ProviderError> {
        if valid_dn(user_id).is_none() {
            return self.sql.list_credentials(state, user_id).await;
        }
        match self.credentials.get_by_dn(user_id).await {
            Some(record) => Ok(vec![self.credential_from_record(state, record).await?]),
            None => Ok(Vec::new()),
        }
    }

    /// Delete the credential
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_credential<'a>(
        &self,
        state: &ServiceState,
        access: &'a str,
    ) -> Result<(), Ec2ProviderError> {
        self.sql.delete_credential(state, access).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::collections::BTreeMap;

    use super::*;
    use crate::directory::{DirectoryValue, MockDirectoryApi};
    use crate::ec2::backend::sql::tests::get_credential_mock;
    use crate::identity::{MockIdentityProvider, Tenant};
    use crate::provider::Provider;
    use crate::tests::get_state_mock_with;

    const DN: &str = "uid=jdoe,ou=Users,dc=example,dc=com";

    fn record() -> DirectoryRecord {
        DirectoryRecord {
            dn: DN.into(),
            name: Some("AKIA1".into()),
            attributes: BTreeMap::from([(
                "secret".into(),
                Some(DirectoryValue::String("s3cr3t".into())),
            )]),
        }
    }

    fn backend(directory: MockDirectoryApi) -> LdapSqlBackend {
        let mut config = Config::default();
        config.ldap.default_tenant = Some("ldap_users".into());
        LdapSqlBackend::with_directory(&config, Arc::new(directory))
    }

    fn identity_mock(found: bool) -> MockIdentityProvider {
        let mut identity = MockIdentityProvider::default();
        identity
            .expect_get_tenant_by_name()
            .withf(|_, name: &str| name == "ldap_users")
            .returning(move |_, name| {
                if found {
                    Ok(Tenant {
                        id: "t1".into(),
                        name: name.into(),
                        enabled: true,
                        ..Default::default()
                    })
                } else {
                    Err(IdentityProviderError::TenantNotFound(name.into()))
                }
            });
        identity
    }

    #[tokio::test]
    async fn test_get_directory() {
        let mut directory = MockDirectoryApi::default();
        directory
            .expect_get_by_name()
            .withf(|name: &str| name == "AKIA1")
            .returning(|_| Some(record()));
        let state = get_state_mock_with(
            Provider::mocked_builder().identity(identity_mock(true)),
            DatabaseConnection::Disconnected,
        );

        assert_eq!(
            backend(directory)
                .get_credential(&state, "AKIA1")
                .await
                .unwrap(),
            Some(Ec2Credential {
                access: "AKIA1".into(),
                secret: Some("s3cr3t".into()),
                user_id: DN.into(),
                tenant_id: Some("t1".into()),
            })
        );
    }

    #[tokio::test]
    async fn test_get_directory_no_default_tenant() {
        let mut directory = MockDirectoryApi::default();
        directory.expect_get_by_name().returning(|_| Some(record()));
        let state = get_state_mock_with(
            Provider::mocked_builder().identity(identity_mock(false)),
            DatabaseConnection::Disconnected,
        );

        let cred = backend(directory)
            .get_credential(&state, "AKIA1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cred.user_id, DN);
        assert!(cred.tenant_id.is_none());
    }

    #[tokio::test]
    async fn test_get_fallback() {
        let mut directory = MockDirectoryApi::default();
        directory.expect_get_by_name().returning(|_| None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_credential_mock("a1")]])
            .into_connection();
        let state = get_state_mock_with(Provider::mocked_builder(), db);

        let cred = backend(directory)
            .get_credential(&state, "a1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cred.user_id, "u1");
        assert_eq!(cred.tenant_id.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_list_directory_user() {
        let mut directory = MockDirectoryApi::default();
        directory
            .expect_get_by_dn()
            .withf(|dn: &str| dn == DN)
            .returning(|_| Some(record()));
        let state = get_state_mock_with(
            Provider::mocked_builder().identity(identity_mock(true)),
            DatabaseConnection::Disconnected,
        );

        let creds = backend(directory)
            .list_credentials(&state, DN)
            .await
            .unwrap();
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].access, "AKIA1");
    }

    #[tokio::test]
    async fn test_list_directory_user_without_credential() {
        let mut directory = MockDirectoryApi::default();
        directory.expect_get_by_dn().returning(|_| None);
        let state = get_state_mock_with(
            Provider::mocked_builder(),
            DatabaseConnection::Disconnected,
        );

        assert!(
            backend(directory)
                .list_credentials(&state, DN)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_list_sql_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_credential_mock("a1")]])
            .into_connection();
        let state = get_state_mock_with(Provider::mocked_builder(), db);

        let creds = backend(MockDirectoryApi::default())
            .list_credentials(&state, "u1")
            .await
            .unwrap();
        assert_eq!(
            creds,
            vec![Ec2Credential::from(get_credential_mock("a1"))]
        );
    }
}
