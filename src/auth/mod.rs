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

//! Authentication information.
//!
//! Result of the successful authentication by the identity backends together
//! with the validation rules shared by all backends (user and tenant must be
//! enabled).

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::identity::types::{Metadata, Tenant, UserResponse};

#[derive(Error, Debug)]
pub enum AuthenticationError {
    /// Builder error
    #[error("building authentication information: {source}")]
    AuthenticatedInfoBuilder {
        #[from]
        source: AuthenticatedInfoBuilderError,
    },

    /// The requested tenant is not among the tenants of the user.
    #[error("invalid tenant {0}")]
    InvalidTenant(String),

    /// Tenant is disabled
    #[error("The tenant is disabled: {0}")]
    TenantDisabled(String),

    /// Unauthorized
    #[error("The request you have made requires authentication: {0}")]
    Unauthorized(String),

    /// User is disabled
    #[error("The account is disabled for user: {0}")]
    UserDisabled(String),

    /// Unknown user or wrong password. Both are reported the same way.
    #[error("wrong username or password")]
    UserNameOrPasswordWrong,
}

/// Information about successful authentication
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(setter(into, strip_option))]
pub struct AuthenticatedInfo {
    /// User id.
    pub user_id: String,

    /// Resolved user object.
    #[builder(default)]
    pub user: Option<UserResponse>,

    /// Tenant the user authenticated for.
    #[builder(default)]
    pub tenant: Option<Tenant>,

    /// User metadata on the tenant.
    #[builder(default)]
    pub metadata: Metadata,
}

impl AuthenticatedInfo {
    pub fn builder() -> AuthenticatedInfoBuilder {
        AuthenticatedInfoBuilder::default()
    }

    /// Validate the authentication information
    ///
    /// - User attribute must be set
    /// - User must be enabled
    /// - User object id must match user_id
    /// - Tenant, when resolved, must be enabled
    pub fn validate(&self) -> Result<(), AuthenticationError> {
        if let Some(user) = &self.user {
            if user.id != self.user_id {
                warn!(
                    "User data does not match the user_id attribute: {} vs {}",
                    self.user_id, user.id
                );
                return Err(AuthenticationError::Unauthorized(
                    "user mismatch".into(),
                ));
            }
            if !user.enabled {
                return Err(AuthenticationError::UserDisabled(self.user_id.clone()));
            }
        } else {
            warn!(
                "User data must be resolved in the AuthenticatedInfo before validating: {:?}",
                self
            );
            return Err(AuthenticationError::Unauthorized(
                "user is not resolved".into(),
            ));
        }
        if let Some(tenant) = &self.tenant
            && !tenant.enabled
        {
            return Err(AuthenticationError::TenantDisabled(tenant.id.clone()));
        }

        Ok(())
    }
}
