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
//! # Identity provider
//!
//! Following identity concepts are covered by the identity provider:
//!
//! ## User
//!
//! A digital representation of a person, system, or service that uses
//! OpenStack cloud services. Users of the `ldap_sql` backend may live in the
//! directory, in which case their ID is the DN of the entry.
//!
//! ## Tenant
//!
//! A container grouping the resources. Users are members of tenants and are
//! granted roles on them.
//!
//! ## Role
//!
//! A named set of privileges. The roles of the user on the tenant are kept in
//! the metadata document of the pair.
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod password_hashing;
pub mod remote_user;
pub mod types;

use crate::auth::AuthenticatedInfo;
use crate::config::Config;
use crate::identity::backend::{IdentityBackend, LdapSqlBackend, SqlBackend};
use crate::keystone::ServiceState;
use crate::plugin_manager::PluginManager;
pub use error::IdentityProviderError;
#[cfg(test)]
pub use mock::MockIdentityProvider;
pub use remote_user::RemoteUserPolicy;
pub use types::*;

pub struct IdentityProvider {
    backend_driver: Arc<dyn IdentityBackend>,
    remote_user_policy: Option<RemoteUserPolicy>,
}

impl IdentityProvider {
    pub fn new(
        config: &Config,
        plugin_manager: &PluginManager,
    ) -> Result<Self, IdentityProviderError> {
        let backend_driver: Arc<dyn IdentityBackend> = if let Some(driver) =
            plugin_manager.get_identity_backend(config.identity.driver.clone())
        {
            driver.clone()
        } else {
            match config.identity.driver.as_str() {
                "sql" => Arc::new(SqlBackend::default()),
                "ldap_sql" => Arc::new(LdapSqlBackend::new(config)),
                _ => {
                    return Err(IdentityProviderError::UnsupportedDriver(
                        config.identity.driver.clone(),
                    ));
                }
            }
        };
        let remote_user_policy = config
            .ldapauthz
            .ldap_policy
            .as_ref()
            .map(RemoteUserPolicy::load)
            .transpose()?;
        Ok(Self {
            backend_driver,
            remote_user_policy,
        })
    }
}

#[async_trait]
impl IdentityApi for IdentityProvider {
    /// Authenticate the user with the password.
    #[tracing::instrument(level = "info", skip(self, state, password))]
    async fn authenticate<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: Option<&'a str>,
        password: &'a str,
    ) -> Result<AuthenticatedInfo, IdentityProviderError> {
        let authn = self
            .backend_driver
            .authenticate(state, user_id, tenant_id, password)
            .await?;
        authn.validate()?;
        Ok(authn)
    }

    /// Create the user. The password is stored hashed.
    #[tracing::instrument(level = "info", skip(self, state, user))]
    async fn create_user(
        &self,
        state: &ServiceState,
        user: UserCreate,
    ) -> Result<UserResponse, IdentityProviderError> {
        let mut new = user;
        if new.id.is_none() {
            new.id = Some(Uuid::new_v4().simple().to_string());
        }
        new.validate()?;
        self.backend_driver.create_user(state, new).await
    }

    /// Get a single user.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<UserResponse, IdentityProviderError> {
        self.backend_driver
            .get_user(state, user_id)
            .await?
            .ok_or_else(|| IdentityProviderError::UserNotFound(user_id.to_string()))
    }

    /// Find the user by the name.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_user_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<UserResponse, IdentityProviderError> {
        self.backend_driver
            .get_user_by_name(state, name)
            .await?
            .ok_or_else(|| IdentityProviderError::UserNotFound(name.to_string()))
    }

    /// List users.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn list_users(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<UserResponse>, IdentityProviderError> {
        self.backend_driver.list_users(state).await
    }

    /// Update the user. The user ID can not be changed.
    #[tracing::instrument(level = "info", skip(self, state, user))]
    async fn update_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        user: UserUpdate,
    ) -> Result<UserResponse, IdentityProviderError> {
        user.validate()?;
        self.backend_driver.update_user(state, user_id, user).await
    }

    /// Delete the user together with the tenant memberships and metadata.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.backend_driver.delete_user(state, user_id).await
    }

    /// Create the tenant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn create_tenant(
        &self,
        state: &ServiceState,
        tenant: TenantCreate,
    ) -> Result<Tenant, IdentityProviderError> {
        let mut new = tenant;
        if new.id.is_none() {
            new.id = Some(Uuid::new_v4().simple().to_string());
        }
        new.validate()?;
        self.backend_driver.create_tenant(state, new).await
    }

    /// Get a single tenant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<Tenant, IdentityProviderError> {
        self.backend_driver
            .get_tenant(state, tenant_id)
            .await?
            .ok_or_else(|| IdentityProviderError::TenantNotFound(tenant_id.to_string()))
    }

    /// Find the tenant by the name.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_tenant_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Tenant, IdentityProviderError> {
        self.backend_driver
            .get_tenant_by_name(state, name)
            .await?
            .ok_or_else(|| IdentityProviderError::TenantNotFound(name.to_string()))
    }

    /// List tenants.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn list_tenants(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<Tenant>, IdentityProviderError> {
        self.backend_driver.list_tenants(state).await
    }

    /// Update the tenant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn update_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        tenant: TenantUpdate,
    ) -> Result<Tenant, IdentityProviderError> {
        tenant.validate()?;
        self.backend_driver.update_tenant(state, tenant_id, tenant).await
    }

    /// Delete the tenant together with the memberships and metadata.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.backend_driver.delete_tenant(state, tenant_id).await
    }

    /// List users of the tenant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_tenant_users<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<Vec<UserResponse>, IdentityProviderError> {
        self.backend_driver.get_tenant_users(state, tenant_id).await
    }

    /// Add the user to the tenant. Existing membership is not an error.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn add_user_to_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.backend_driver.add_user_to_tenant(state, tenant_id, user_id).await
    }

    /// Remove the user from the tenant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn remove_user_from_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.backend_driver.remove_user_from_tenant(state, tenant_id, user_id).await
    }

    /// List IDs of the tenants the user is a member of.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_tenants_for_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Vec<String>, IdentityProviderError> {
        self.backend_driver.get_tenants_for_user(state, user_id).await
    }

    /// Get metadata of the user on the tenant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_metadata<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
    ) -> Result<Metadata, IdentityProviderError> {
        self.backend_driver
            .get_metadata(state, user_id, tenant_id)
            .await?
            .ok_or_else(|| IdentityProviderError::MetadataNotFound {
                user_id: user_id.to_string(),
                tenant_id: tenant_id.to_string(),
            })
    }

    /// Grant the role to the user on the tenant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn add_role_to_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.backend_driver.add_role_to_user_and_tenant(state, user_id, tenant_id, role_id).await
    }

    /// Revoke the role of the user on the tenant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn remove_role_from_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.backend_driver.remove_role_from_user_and_tenant(state, user_id, tenant_id, role_id).await
    }

    /// List IDs of the roles granted to the user on the tenant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_roles_for_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
    ) -> Result<Vec<String>, IdentityProviderError> {
        self.backend_driver.get_roles_for_user_and_tenant(state, user_id, tenant_id).await
    }

    /// Create the role.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn create_role(
        &self,
        state: &ServiceState,
        role: RoleCreate,
    ) -> Result<Role, IdentityProviderError> {
        let mut new = role;
        if new.id.is_none() {
            new.id = Some(Uuid::new_v4().simple().to_string());
        }
        new.validate()?;
        self.backend_driver.create_role(state, new).await
    }

    /// Get a single role.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
    ) -> Result<Role, IdentityProviderError> {
        self.backend_driver
            .get_role(state, role_id)
            .await?
            .ok_or_else(|| IdentityProviderError::RoleNotFound(role_id.to_string()))
    }

    /// List roles.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn list_roles(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<Role>, IdentityProviderError> {
        self.backend_driver.list_roles(state).await
    }

    /// Update the role.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn update_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
        role: RoleUpdate,
    ) -> Result<Role, IdentityProviderError> {
        role.validate()?;
        self.backend_driver.update_role(state, role_id, role).await
    }

    /// Delete the role and revoke it from every grant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        self.backend_driver.delete_role(state, role_id).await
    }

    /// Check the user authenticated by the frontend (`REMOTE_USER`).
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn check_remote_user<'a>(
        &self,
        state: &ServiceState,
        user_dn: &'a str,
        tenant_name: &'a str,
    ) -> Result<(UserResponse, Tenant), IdentityProviderError> {
        remote_user::check_remote_user(self.backend_driver.as_ref(), state, user_dn, tenant_name)
            .await
    }

    /// Map the remote user to the tenant with the policy and check it.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn authorize_remote_user<'a>(
        &self,
        state: &ServiceState,
        user_dn: &'a str,
    ) -> Result<(UserResponse, Tenant), IdentityProviderError> {
        let tenant_name = self
            .remote_user_policy
            .as_ref()
            .ok_or_else(|| RemoteUserPolicy::not_accepted(user_dn))?
            .map_user(user_dn)?;
        self.check_remote_user(state, user_dn, &tenant_name).await
    }
}
