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
//! # Error
//!
//! Diverse errors that can occur during the Keystone processing.
use sea_orm::SqlErr;
use thiserror::Error;

use crate::catalog::error::CatalogProviderError;
use crate::directory::error::DirectoryError;
use crate::ec2::error::Ec2ProviderError;
use crate::identity::error::IdentityProviderError;

/// Keystone error.
#[derive(Debug, Error)]
pub enum KeystoneError {
    #[error(transparent)]
    CatalogError {
        #[from]
        source: CatalogProviderError,
    },

    #[error(transparent)]
    DirectoryError {
        #[from]
        source: DirectoryError,
    },

    #[error(transparent)]
    Ec2Error {
        #[from]
        source: Ec2ProviderError,
    },

    #[error(transparent)]
    IdentityError {
        #[from]
        source: IdentityProviderError,
    },

    #[error(transparent)]
    IO {
        #[from]
        source: std::io::Error,
    },

    /// Json serialization error.
    #[error("json serde error: {}", source)]
    JsonError {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },
}

/// Error of the structure builders.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Mandatory field has not been set.
    #[error("{0}")]
    UninitializedField(String),

    /// Builder validation failed.
    #[error("{0}")]
    Validation(String),
}

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        Self::UninitializedField(value.to_string())
    }
}

impl From<String> for BuilderError {
    fn from(value: String) -> Self {
        Self::Validation(value)
    }
}

/// Database operation error.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Unique or foreign key constraint violation.
    #[error("{message}")]
    Conflict { message: String, context: String },

    /// Other SQL level error.
    #[error("{message}")]
    Sql { message: String, context: String },

    /// Database connectivity or driver error.
    #[error("Database error while {context}")]
    Database {
        source: sea_orm::DbErr,
        context: String,
    },
}

/// Convert the DB error into the [DatabaseError] with the context information.
pub fn db_err(e: sea_orm::DbErr, context: &str) -> DatabaseError {
    e.sql_err().map_or_else(
        || DatabaseError::Database {
            source: e,
            context: context.to_string(),
        },
        |err| match err {
            SqlErr::UniqueConstraintViolation(descr) => DatabaseError::Conflict {
                message: descr.to_string(),
                context: context.to_string(),
            },
            SqlErr::ForeignKeyConstraintViolation(descr) => DatabaseError::Conflict {
                message: descr.to_string(),
                context: context.to_string(),
            },
            other => DatabaseError::Sql {
                message: other.to_string(),
                context: context.to_string(),
            },
        },
    )
}

/// Attach the operation context to the raw database errors.
pub trait DbContextExt<T> {
    fn context(self, context: &str) -> Result<T, DatabaseError>;
}

impl<T> DbContextExt<T> for Result<T, sea_orm::DbErr> {
    fn context(self, context: &str) -> Result<T, DatabaseError> {
        self.map_err(|e| db_err(e, context))
    }
}
