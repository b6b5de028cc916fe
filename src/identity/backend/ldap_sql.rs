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
//! # LDAP federated identity backend
//!
//! Users are looked up in the directory first and in the database second.
//! Tenants, roles and grants always live in the database. Directory users are
//! members of the single configured default tenant and are granted the
//! configured default roles there.
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::auth::{AuthenticatedInfo, AuthenticationError};
use crate::config::Config;
use crate::directory::{DirectoryApi, DirectoryClient, DirectoryRecord, valid_dn};
use crate::identity::IdentityProviderError;
use crate::identity::backend::{IdentityBackend, SqlBackend};
use crate::identity::types::*;
use crate::keystone::ServiceState;

/// Mapped attributes that are not exposed in the user `extra`.
const RESERVED_ATTRIBUTES: [&str; 4] = ["id", "name", "enabled", "password"];

/// Identity backend federating the directory users with the database.
pub struct LdapSqlBackend {
    sql: SqlBackend,
    users: Arc<dyn DirectoryApi>,
    default_tenant: Option<String>,
    default_roles: Vec<String>,
}

impl LdapSqlBackend {
    pub fn new(config: &Config) -> Self {
        Self::with_directory(
            config,
            Arc::new(DirectoryClient::new(&config.ldap, config.ldap.user())),
        )
    }

    pub fn with_directory(config: &Config, users: Arc<dyn DirectoryApi>) -> Self {
        Self {
            sql: SqlBackend::default(),
            users,
            default_tenant: config.ldap.default_tenant.clone(),
            default_roles: config.ldap.default_roles.clone(),
        }
    }

    /// The configured default tenant when it exists.
    async fn default_tenant(
        &self,
        state: &ServiceState,
    ) -> Result<Option<Tenant>, IdentityProviderError> {
        match &self.default_tenant {
            Some(name) => self.sql.get_tenant_by_name(state, name).await,
            None => Ok(None),
        }
    }

    /// IDs of the roles named in the default roles.
    async fn default_role_ids(&self, state: &ServiceState) -> Result<Vec<String>, IdentityProviderError> {
        Ok(self
            .sql
            .list_roles(state)
            .await?
            .into_iter()
            .filter(|role| self.default_roles.contains(&role.name))
            .map(|role| role.id)
            .collect())
    }
}

/// Convert the directory entry into the user.
///
/// The DN is the user ID. The password is never exposed.
pub(crate) fn user_from_record(record: DirectoryRecord) -> UserResponse {
    let name = record
        .get_string("name")
        .or_else(|| record.name.clone())
        .unwrap_or_else(|| record.dn.clone());
    let enabled = record
        .get("enabled")
        .and_then(|val| val.as_bool())
        .unwrap_or(true);
    let extra: Map<String, Value> = record
        .attributes
        .into_iter()
        .filter(|(field, _)| !RESERVED_ATTRIBUTES.contains(&field.as_str()))
        .filter_map(|(field, val)| val.map(|val| (field, val.into())))
        .collect();
    UserResponse {
        id: record.dn,
        name,
        enabled,
        extra: (!extra.is_empty()).then_some(Value::Object(extra)),
    }
}

#[async_trait]
impl IdentityBackend for LdapSqlBackend {
    /// Authenticate against the directory first, then against the database.
    #[tracing::instrument(level = "debug", skip(self, state, password))]
    async fn authenticate<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: Option<&'a str>,
        password: &'a str,
    ) -> Result<AuthenticatedInfo, IdentityProviderError> {
        let Some(record) = self.users.authenticate(user_id, password).await else {
            debug!("directory authentication of {user_id} failed, using the database");
            return self
                .sql
                .authenticate(state, user_id, tenant_id, password)
                .await;
        };

        let tenants = self.get_tenants_for_user(state, user_id).await?;
        debug!("directory user tenants: {:?}", tenants);
        let user = user_from_record(record);
        let mut builder = AuthenticatedInfo::builder();
        builder.user_id(user.id.clone());
        if let Some(tenant_id) = tenant_id {
            if !tenants.iter().any(|x| x == tenant_id) {
                return Err(AuthenticationError::InvalidTenant(tenant_id.to_string()).into());
            }
            if let Some(tenant) = self.sql.get_tenant(state, tenant_id).await? {
                builder.tenant(tenant);
                builder.metadata(
                    self.get_metadata(state, user_id, tenant_id)
                        .await?
                        .unwrap_or_default(),
                );
            }
        }
        Ok(builder
            .user(user)
            .build()
            .map_err(AuthenticationError::from)?)
    }

    /// Create the user. The password is stored hashed.
    #[tracing::instrument(level = "debug", skip(self, state, user))]
    async fn create_user(
        &self,
        state: &ServiceState,
        user: UserCreate,
    ) -> Result<UserResponse, IdentityProviderError> {
        self.sql.create_user(state, user).await
    }

    /// Users identified by a DN are only looked up in the directory.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Option<UserResponse>, IdentityProviderError> {
        if valid_dn(user_id).is_none() {
            return self.sql.get_user(state, user_id).await;
        }
        Ok(self.users.get_by_dn(user_id).await.map(user_from_record))
    }

    /// The directory user takes precedence over the database one.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_user_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<UserResponse>, IdentityProviderError> {
        if let Some(record) = self.users.get_by_name(name).await {
            return Ok(Some(user_from_record(record)));
        }
        self.sql.get_user_by_name(state, name).await
    }

    /// Database users followed by the directory users. Users present in both
    /// sources are listed twice.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_users(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<UserResponse>, IdentityProviderError> {
        let mut users = self.sql.list_users(state).await?;
        users.extend(self.users.get_all().await.into_iter().map(user_from_record));
        Ok(users)
    }

    /// Update the user. The user ID can not be changed.
    #[tracing::instrument(level = "debug", skip(self, state, user))]
    async fn update_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        user: UserUpdate,
    ) -> Result<UserResponse, IdentityProviderError> {
        self.sql.update_user(state, user_id, user).await
    }

    /// Delete the user together with the tenant memberships and metadata.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.sql.delete_user(state, user_id).await
    }

    /// Create the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_tenant(
        &self,
        state: &ServiceState,
        tenant: TenantCreate,
    ) -> Result<Tenant, IdentityProviderError> {
        self.sql.create_tenant(state, tenant).await
    }

    /// Get a single tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<Option<Tenant>, IdentityProviderError> {
        self.sql.get_tenant(state, tenant_id).await
    }

    /// Find the tenant by the name.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_tenant_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<Tenant>, IdentityProviderError> {
        self.sql.get_tenant_by_name(state, name).await
    }

    /// List tenants.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_tenants(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<Tenant>, IdentityProviderError> {
        self.sql.list_tenants(state).await
    }

    /// Update the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn update_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        tenant: TenantUpdate,
    ) -> Result<Tenant, IdentityProviderError> {
        self.sql.update_tenant(state, tenant_id, tenant).await
    }

    /// Delete the tenant together with the memberships and metadata.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.sql.delete_tenant(state, tenant_id).await
    }

    /// Members of the default tenant also include the whole directory.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_tenant_users<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<Vec<UserResponse>, IdentityProviderError> {
        let mut users = self.sql.get_tenant_users(state, tenant_id).await?;
        if let Some(tenant) = self.sql.get_tenant(state, tenant_id).await?
            && self.default_tenant.as_ref() == Some(&tenant.name)
        {
            users.extend(self.users.get_all().await.into_iter().map(user_from_record));
        }
        Ok(users)
    }

    /// Add the user to the tenant. Existing membership is not an error.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn add_user_to_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.sql.add_user_to_tenant(state, tenant_id, user_id).await
    }

    /// Remove the user from the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn remove_user_from_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.sql.remove_user_from_tenant(state, tenant_id, user_id).await
    }

    /// Directory users are members of the default tenant only.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_tenants_for_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Vec<String>, IdentityProviderError> {
        if valid_dn(user_id).is_none() {
            return self.sql.get_tenants_for_user(state, user_id).await;
        }
        Ok(self
            .default_tenant(state)
            .await?
            .map(|tenant| vec![tenant.id])
            .unwrap_or_default())
    }

    /// Directory users are granted the default roles on any tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_metadata<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
    ) -> Result<Option<Metadata>, IdentityProviderError> {
        if valid_dn(user_id).is_none() {
            return self.sql.get_metadata(state, user_id, tenant_id).await;
        }
        Ok(Some(Metadata::with_roles(self.default_role_ids(state).await?)))
    }

    /// Grant the role to the user on the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn add_role_to_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.sql.add_role_to_user_and_tenant(state, user_id, tenant_id, role_id).await
    }

    /// Revoke the role of the user on the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn remove_role_from_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.sql.remove_role_from_user_and_tenant(state, user_id, tenant_id, role_id).await
    }

    /// Directory users are granted the default roles on any tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_roles_for_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
    ) -> Result<Vec<String>, IdentityProviderError> {
        if valid_dn(user_id).is_none() {
            return self
                .sql
                .get_roles_for_user_and_tenant(state, user_id, tenant_id)
                .await;
        }
        if self.get_user(state, user_id).await?.is_none() {
            return Err(IdentityProviderError::UserNotFound(user_id.to_string()));
        }
        if self.sql.get_tenant(state, tenant_id).await?.is_none() {
            return Err(IdentityProviderError::TenantNotFound(tenant_id.to_string()));
        }
        self.default_role_ids(state).await
    }

    /// Create the role.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_role(
        &self,
        state: &ServiceState,
        role: RoleCreate,
    ) -> Result<Role, IdentityProviderError> {
        self.sql.create_role(state, role).await
    }

    /// Get a single role.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
    ) -> Result<Option<Role>, IdentityProviderError> {
        self.sql.get_role(state, role_id).await
    }

    /// List roles.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_roles(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<Role>, IdentityProviderError> {
        self.sql.list_roles(state).await
    }

    /// Update the role.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn update_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
        role: RoleUpdate,
    ) -> Result<Role, IdentityProviderError> {
        self.sql.update_role(state, role_id, role).await
    }

    /// Delete the role and revoke it from every grant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.sql.delete_role(state, role_id).await
    }
}
