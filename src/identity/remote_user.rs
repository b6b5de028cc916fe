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
//! # Remote user authorization
//!
//! Users authenticated by the frontend (the `REMOTE_USER` of the request) are
//! identified by their DN. The policy maps the DN to the tenant the user is
//! accepted into. Only the `*` rule is supported.
//!
//! ```json
//! {"*": {"tenant": "ldap_users"}}
//! ```
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::AuthenticationError;
use crate::directory::valid_dn;
use crate::identity::IdentityProviderError;
use crate::identity::backend::IdentityBackend;
use crate::identity::types::{Tenant, UserCreate, UserResponse};
use crate::keystone::ServiceState;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
struct RemoteUserRule {
    #[serde(default)]
    tenant: Option<String>,
}

/// Mapping of the remote users to the tenants.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RemoteUserPolicy {
    rules: HashMap<String, RemoteUserRule>,
}

impl RemoteUserPolicy {
    /// Read the policy from the JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, IdentityProviderError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Name of the tenant the user is accepted into.
    pub fn map_user<S: AsRef<str>>(&self, user_dn: S) -> Result<String, IdentityProviderError> {
        self.rules
            .get("*")
            .and_then(|rule| rule.tenant.clone())
            .filter(|tenant| !tenant.is_empty())
            .ok_or_else(|| Self::not_accepted(user_dn))
    }

    pub(super) fn not_accepted<S: AsRef<str>>(user_dn: S) -> IdentityProviderError {
        debug!("no rule accepts the remote user {}", user_dn.as_ref());
        AuthenticationError::Unauthorized("Your LDAP user is not accepted".into()).into()
    }
}

/// Resolve the remote user and the tenant, creating the user when allowed.
pub(super) async fn check_remote_user(
    backend: &dyn IdentityBackend,
    state: &ServiceState,
    user_dn: &str,
    tenant_name: &str,
) -> Result<(UserResponse, Tenant), IdentityProviderError> {
    if valid_dn(user_dn).is_none() {
        return Err(IdentityProviderError::InvalidInput(format!(
            "remote user {user_dn} is not a DN"
        )));
    }
    let autocreate = state.config.ldapauthz.autocreate_users;

    let user = match backend.get_user_by_name(state, user_dn).await? {
        Some(user) => user,
        None if autocreate => {
            let id = Uuid::new_v4().simple().to_string();
            info!("Autocreating remote user {user_dn} with id {id}");
            backend
                .create_user(
                    state,
                    UserCreate {
                        id: Some(id),
                        name: user_dn.to_string(),
                        enabled: Some(true),
                        ..Default::default()
                    },
                )
                .await?
        }
        None => {
            debug!("remote user {user_dn} not found");
            return Err(AuthenticationError::Unauthorized("User not found".into()).into());
        }
    };

    let Some(tenant) = backend.get_tenant_by_name(state, tenant_name).await? else {
        debug!("tenant {tenant_name} not found");
        return Err(AuthenticationError::Unauthorized("Tenant not found".into()).into());
    };

    if autocreate
        && !backend
            .get_tenants_for_user(state, &user.id)
            .await?
            .contains(&tenant.id)
    {
        info!("Adding user {user_dn} to tenant {}", tenant.name);
        backend
            .add_user_to_tenant(state, &tenant.id, &user.id)
            .await?;
    }
    Ok((user, tenant))
}
