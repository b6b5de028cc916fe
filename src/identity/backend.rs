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

pub mod ldap_sql;
pub mod sql;

use crate::auth::AuthenticatedInfo;
use crate::identity::IdentityProviderError;
use crate::identity::types::*;
use crate::keystone::ServiceState;

pub use ldap_sql::LdapSqlBackend;
pub use sql::SqlBackend;

/// Identity storage.
///
/// Getters return `None` for missing objects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Authenticate the user with the password.
    ///
    /// Unknown users and wrong passwords are reported the same way. When the
    /// tenant is requested the user must be its member.
    async fn authenticate<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: Option<&'a str>,
        password: &'a str,
    ) -> Result<AuthenticatedInfo, IdentityProviderError>;

    /// Create the user. The password is stored hashed.
    async fn create_user(
        &self,
        state: &ServiceState,
        user: UserCreate,
    ) -> Result<UserResponse, IdentityProviderError>;

    /// Get a single user.
    async fn get_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Option<UserResponse>, IdentityProviderError>;

    /// Find the user by the name.
    async fn get_user_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<UserResponse>, IdentityProviderError>;

    /// List users.
    async fn list_users(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<UserResponse>, IdentityProviderError>;

    /// Update the user. The user ID can not be changed.
    async fn update_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        user: UserUpdate,
    ) -> Result<UserResponse, IdentityProviderError>;

    /// Delete the user together with the tenant memberships and metadata.
    async fn delete_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError>;

    /// Create the tenant.
    async fn create_tenant(
        &self,
        state: &ServiceState,
        tenant: TenantCreate,
    ) -> Result<Tenant, IdentityProviderError>;

    /// Get a single tenant.
    async fn get_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<Option<Tenant>, IdentityProviderError>;

    /// Find the tenant by the name.
    async fn get_tenant_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<Tenant>, IdentityProviderError>;

    /// List tenants.
    async fn list_tenants(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<Tenant>, IdentityProviderError>;

    /// Update the tenant.
    async fn update_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        tenant: TenantUpdate,
    ) -> Result<Tenant, IdentityProviderError>;

    /// Delete the tenant together with the memberships and metadata.
    async fn delete_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<(), IdentityProviderError>;

    /// List users of the tenant.
    async fn get_tenant_users<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
    ) -> Result<Vec<UserResponse>, IdentityProviderError>;

    /// Add the user to the tenant. Existing membership is not an error.
    async fn add_user_to_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError>;

    /// Remove the user from the tenant.
    async fn remove_user_from_tenant<'a>(
        &self,
        state: &ServiceState,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> Result<(), IdentityProviderError>;

    /// List IDs of the tenants the user is a member of.
    async fn get_tenants_for_user<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Vec<String>, IdentityProviderError>;

    /// Get metadata of the user on the tenant.
    async fn get_metadata<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
    ) -> Result<Option<Metadata>, IdentityProviderError>;

    /// Grant the role to the user on the tenant.
    async fn add_role_to_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError>;

    /// Revoke the role of the user on the tenant.
    async fn remove_role_from_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError>;

    /// List IDs of the roles granted to the user on the tenant.
    async fn get_roles_for_user_and_tenant<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
        tenant_id: &'a str,
    ) -> Result<Vec<String>, IdentityProviderError>;

    /// Create the role.
    async fn create_role(
        &self,
        state: &ServiceState,
        role: RoleCreate,
    ) -> Result<Role, IdentityProviderError>;

    /// Get a single role.
    async fn get_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
    ) -> Result<Option<Role>, IdentityProviderError>;

    /// List roles.
    async fn list_roles(
        &self,
        state: &ServiceState,
    ) -> Result<Vec<Role>, IdentityProviderError>;

    /// Update the role.
    async fn update_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
        role: RoleUpdate,
    ) -> Result<Role, IdentityProviderError>;

    /// Delete the role and revoke it from every grant.
    async fn delete_role<'a>(
        &self,
        state: &ServiceState,
        role_id: &'a str,
    ) -> Result<(), IdentityProviderError>;
}
