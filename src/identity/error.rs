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

use thiserror::Error;

use crate::auth::AuthenticationError;
use crate::error::{BuilderError, DatabaseError};

#[derive(Error, Debug)]
pub enum IdentityProviderError {
    #[error(transparent)]
    AuthenticationInfo {
        #[from]
        source: AuthenticationError,
    },

    /// Conflict.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Driver error.
    #[error("backend driver error: {0}")]
    Driver(String),

    /// Request is invalid.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("policy file error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("user {user_id} is not a member of tenant {tenant_id}")]
    MembershipNotFound { user_id: String, tenant_id: String },

    #[error("metadata of user {user_id} on tenant {tenant_id} not found")]
    MetadataNotFound { user_id: String, tenant_id: String },

    #[error("password hashing error")]
    PasswordHash {
        #[from]
        source: IdentityProviderPasswordHashError,
    },

    #[error("role {0} not found")]
    RoleNotFound(String),

    /// Identity provider error
    #[error("data serialization error")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder {
        #[from]
        source: BuilderError,
    },

    #[error("tenant {0} not found")]
    TenantNotFound(String),

    /// Unsupported driver
    #[error("unsupported driver {0}")]
    UnsupportedDriver(String),

    #[error("user {0} not found")]
    UserNotFound(String),

    /// Validation error.
    #[error("request validation error: {}", source)]
    Validation {
        #[from]
        source: validator::ValidationErrors,
    },
}

impl From<DatabaseError> for IdentityProviderError {
    fn from(source: DatabaseError) -> Self {
        match source {
            cfl @ DatabaseError::Conflict { .. } => Self::Conflict(cfl.to_string()),
            other => Self::Driver(other.to_string()),
        }
    }
}

/// Password hashing related errors.
#[derive(Error, Debug)]
pub enum IdentityProviderPasswordHashError {
    /// Bcrypt error.
    #[error(transparent)]
    BCrypt {
        #[from]
        source: bcrypt::BcryptError,
    },

    /// Async task join error.
    #[error(transparent)]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}
