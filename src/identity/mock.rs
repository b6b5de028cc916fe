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
#[cfg(test)]
use mockall::mock;

use crate::auth::AuthenticatedInfo;
use crate::config::Config;
use crate::identity::IdentityApi;
use crate::identity::IdentityProviderError;
use crate::identity::types::*;
use crate::keystone::ServiceState;
use crate::plugin_manager::PluginManager;

#[cfg(test)]
mock! {
    pub IdentityProvider {
        pub fn new(cfg: &Config, plugin_manager: &PluginManager) -> Result<Self, IdentityProviderError>;
    }

    #[async_trait]
    impl IdentityApi for IdentityProvider {
        async fn authenticate<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
            tenant_id: Option<&'a str>,
            password: &'a str,
        ) -> Result<AuthenticatedInfo, IdentityProviderError>;

        async fn create_user(
            &self,
            state: &ServiceState,
            user: UserCreate,
        ) -> Result<UserResponse, IdentityProviderError>;

        async fn get_user<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
        ) -> Result<UserResponse, IdentityProviderError>;

        async fn get_user_by_name<'a>(
            &self,
            state: &ServiceState,
            name: &'a str,
        ) -> Result<UserResponse, IdentityProviderError>;

        async fn list_users(
            &self,
            state: &ServiceState,
        ) -> Result<Vec<UserResponse>, IdentityProviderError>;

        async fn update_user<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
            user: UserUpdate,
        ) -> Result<UserResponse, IdentityProviderError>;

        async fn delete_user<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
        ) -> Result<(), IdentityProviderError>;

        async fn create_tenant(
            &self,
            state: &ServiceState,
            tenant: TenantCreate,
        ) -> Result<Tenant, IdentityProviderError>;

        async fn get_tenant<'a>(
            &self,
            state: &ServiceState,
            tenant_id: &'a str,
        ) -> Result<Tenant, IdentityProviderError>;

        async fn get_tenant_by_name<'a>(
            &self,
            state: &ServiceState,
            name: &'a str,
        ) -> Result<Tenant, IdentityProviderError>;

        async fn list_tenants(
            &self,
            state: &ServiceState,
        ) -> Result<Vec<Tenant>, IdentityProviderError>;

        async fn update_tenant<'a>(
            &self,
            state: &ServiceState,
            tenant_id: &'a str,
            tenant: TenantUpdate,
        ) -> Result<Tenant, IdentityProviderError>;

        async fn delete_tenant<'a>(
            &self,
            state: &ServiceState,
            tenant_id: &'a str,
        ) -> Result<(), IdentityProviderError>;

        async fn get_tenant_users<'a>(
            &self,
            state: &ServiceState,
            tenant_id: &'a str,
        ) -> Result<Vec<UserResponse>, IdentityProviderError>;

        async fn add_user_to_tenant<'a>(
            &self,
            state: &ServiceState,
            tenant_id: &'a str,
            user_id: &'a str,
        ) -> Result<(), IdentityProviderError>;

        async fn remove_user_from_tenant<'a>(
            &self,
            state: &ServiceState,
            tenant_id: &'a str,
            user_id: &'a str,
        ) -> Result<(), IdentityProviderError>;

        async fn get_tenants_for_user<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
        ) -> Result<Vec<String>, IdentityProviderError>;

        async fn get_metadata<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
            tenant_id: &'a str,
        ) -> Result<Metadata, IdentityProviderError>;

        async fn add_role_to_user_and_tenant<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
            tenant_id: &'a str,
            role_id: &'a str,
        ) -> Result<(), IdentityProviderError>;

        async fn remove_role_from_user_and_tenant<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
            tenant_id: &'a str,
            role_id: &'a str,
        ) -> Result<(), IdentityProviderError>;

        async fn get_roles_for_user_and_tenant<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
            tenant_id: &'a str,
        ) -> Result<Vec<String>, IdentityProviderError>;

        async fn create_role(
            &self,
            state: &ServiceState,
            role: RoleCreate,
        ) -> Result<Role, IdentityProviderError>;

        async fn get_role<'a>(
            &self,
            state: &ServiceState,
            role_id: &'a str,
        ) -> Result<Role, IdentityProviderError>;

        async fn list_roles(
            &self,
            state: &ServiceState,
        ) -> Result<Vec<Role>, IdentityProviderError>;

        async fn update_role<'a>(
            &self,
            state: &ServiceState,
            role_id: &'a str,
            role: RoleUpdate,
        ) -> Result<Role, IdentityProviderError>;

        async fn delete_role<'a>(
            &self,
            state: &ServiceState,
            role_id: &'a str,
        ) -> Result<(), IdentityProviderError>;

        async fn check_remote_user<'a>(
            &self,
            state: &ServiceState,
            user_dn: &'a str,
            tenant_name: &'a str,
        ) -> Result<(UserResponse, Tenant), IdentityProviderError>;

        async fn authorize_remote_user<'a>(
            &self,
            state: &ServiceState,
            user_dn: &'a str,
        ) -> Result<(UserResponse, Tenant), IdentityProviderError>;
    }
}
