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
//! Password authentication against the database.
use sea_orm::DatabaseConnection;

use super::{membership, metadata, tenant, user};
use crate::auth::{AuthenticatedInfo, AuthenticationError};
use crate::config::Config;
use crate::identity::IdentityProviderError;
use crate::identity::password_hashing;
use crate::identity::types::*;

/// Authenticate a user by a password.
///
/// - Unknown user, user without password and wrong password are reported as
///   [`AuthenticationError::UserNameOrPasswordWrong`].
/// - When the tenant is requested the user must be its member, otherwise
///   [`AuthenticationError::InvalidTenant`] is returned.
/// - A tenant that disappeared meanwhile and missing metadata resolve to no
///   tenant and empty metadata.
pub async fn authenticate(
    config: &Config,
    db: &DatabaseConnection,
    user_id: &str,
    tenant_id: Option<&str>,
    password: &str,
) -> Result<AuthenticatedInfo, IdentityProviderError> {
    let user = user::get_main_entry(db, user_id)
        .await?
        .ok_or(AuthenticationError::UserNameOrPasswordWrong)?;
    let expected_hash = user
        .password
        .as_ref()
        .ok_or(AuthenticationError::UserNameOrPasswordWrong)?;
    if !password_hashing::verify_password(config, password, expected_hash).await? {
        return Err(AuthenticationError::UserNameOrPasswordWrong)?;
    }

    let mut builder = AuthenticatedInfo::builder();
    builder.user_id(user.id.clone());
    if let Some(tenant_id) = tenant_id {
        if !membership::tenants_for_user(db, user_id)
            .await?
            .iter()
            .any(|x| x == tenant_id)
        {
            return Err(AuthenticationError::InvalidTenant(tenant_id.to_string()))?;
        }
        if let Some(tenant) = tenant::get(db, tenant_id).await? {
            builder.tenant(tenant);
            builder.metadata(
                metadata::get(db, user_id, tenant_id)
                    .await?
                    .unwrap_or_default(),
            );
        }
    }
    let user: UserResponse = user.try_into()?;
    Ok(builder
        .user(user)
        .build()
        .map_err(AuthenticationError::from)?)
}
