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

use async_trait::async_trait;

mod authenticate;
mod membership;
mod metadata;
mod role;
mod tenant;
mod user;

use crate::auth::AuthenticatedInfo;
use crate::identity::IdentityProviderError;
use crate::identity::backend::IdentityBackend;
use crate::identity::types::*;
use crate::keystone::ServiceState;

/// Identity backend keeping everything in the database.
#[derive(Clone, Debug, Default)]
pub struct SqlBackend {}

#[async_trait]
impl IdentityBackend for SqlBackend {
    /// Authenticate the user with the password.
    #[tracing::instrument(level = "debug", skip(self, state, password))]
    async fn authenticate<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: Option<&'a str>,
        password: &'a str,
    ) -> Result<AuthenticatedInfo, IdentityProviderError> {
        authenticate::authenticate(&state.config, &state.db, user_id, tenant_id, password).await
    }

    /// Create the user. The password is stored hashed.
    #[tracing::instrument(level = "debug", skip(self, state, user))]
    async fn create_user(
        &self,
        state: &ServiceState,
        user: UserCreate,
    ) -> Result<UserResponse, IdentityProviderError> {
        user::create(&state.config, &state.db, user).await
    }

    /// Get a single user.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Option<UserResponse>, IdentityProviderError> {
        user::get(&state.db, user_id).await
    }

    /// Find the user by the name.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_user_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<UserResponse>, IdentityProviderError> {
        user::get_by_name(&state.db, name).await
    }

    /// List users.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_users(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<UserResponse>, IdentityProviderError> {
        user::list(&state.db).await
    }

    /// Update the user. The user ID can not be changed.
    #[tracing::instrument(level = "debug", skip(self, state, user))]
    async fn update_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        user: UserUpdate,
    ) -> Result<UserResponse, IdentityProviderError> {
        user::update(&state.config, &state.db, user_id, user).await
    }

    /// Delete the user together with the tenant memberships and metadata.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        user::delete(&state.db, user_id).await
    }

    /// Create the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_tenant(
        &self,
        state: &ServiceState,
        tenant: TenantCreate,
    ) -> Result<Tenant, IdentityProviderError> {
        tenant::create(&state.db, tenant).await
    }

    /// Get a single tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<Option<Tenant>, IdentityProviderError> {
        tenant::get(&state.db, tenant_id).await
    }

    /// Find the tenant by the name.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_tenant_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<Tenant>, IdentityProviderError> {
        tenant::get_by_name(&state.db, name).await
    }

    /// List tenants.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_tenants(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<Tenant>, IdentityProviderError> {
        tenant::list(&state.db).await
    }

    /// Update the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn update_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        tenant: TenantUpdate,
    ) -> Result<Tenant, IdentityProviderError> {
        tenant::update(&state.db, tenant_id, tenant).await
    }

    /// Delete the tenant together with the memberships and metadata.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        tenant::delete(&state.db, tenant_id).await
    }

    /// List users of the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_tenant_users<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<Vec<UserResponse>, IdentityProviderError> {
        membership::tenant_users(&state.db, tenant_id).await
    }

    /// Add the user to the tenant. Existing membership is not an error.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn add_user_to_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        membership::add(&state.db, tenant_id, user_id).await
    }

    /// Remove the user from the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn remove_user_from_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        membership::remove(&state.db, tenant_id, user_id).await
    }

    /// List IDs of the tenants the user is a member of.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_tenants_for_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Vec<String>, IdentityProviderError> {
        membership::tenants_for_user(&state.db, user_id).await
    }

    /// Get metadata of the user on the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_metadata<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
    ) -> Result<Option<Metadata>, IdentityProviderError> {
        metadata::get(&state.db, user_id, tenant_id).await
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
        metadata::add_role(&state.db, user_id, tenant_id, role_id).await
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
        metadata::remove_role(&state.db, user_id, tenant_id, role_id).await
    }

    /// List IDs of the roles granted to the user on the tenant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_roles_for_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
    ) -> Result<Vec<String>, IdentityProviderError> {
        metadata::roles_for_user_and_tenant(&state.db, user_id, tenant_id).await
    }

    /// Create the role.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_role(
        &self,
        state: &ServiceState,
        role: RoleCreate,
    ) -> Result<Role, IdentityProviderError> {
        role::create(&state.db, role).await
    }

    /// Get a single role.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
    ) -> Result<Option<Role>, IdentityProviderError> {
        role::get(&state.db, role_id).await
    }

    /// List roles.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_roles(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<Role>, IdentityProviderError> {
        role::list(&state.db).await
    }

    /// Update the role.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn update_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
        role: RoleUpdate,
    ) -> Result<Role, IdentityProviderError> {
        role::update(&state.db, role_id, role).await
    }

    /// Delete the role and revoke it from every grant.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError> {
        role::delete(&state.db, role_id).await
    }
}
