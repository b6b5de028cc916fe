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
//! Directory errors.
use thiserror::Error;

/// Directory access error.
///
/// These errors never leave the [`DirectoryClient`](super::DirectoryClient):
/// they are logged and turned into "no result".
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Bind was rejected.
    #[error("invalid credentials for {0}")]
    InvalidCredentials(String),

    /// The DN is not syntactically valid.
    #[error("invalid DN syntax: {0}")]
    InvalidDnSyntax(String),

    /// Search base does not exist.
    #[error("no such object: {0}")]
    NoSuchObject(String),

    /// Server can not be reached.
    #[error("directory server {url} is unavailable: {message}")]
    Unavailable { url: String, message: String },

    /// Any other unexpected result code.
    #[error("directory protocol error: {0}")]
    Protocol(String),
}

impl DirectoryError {
    /// Convert the `ldap3` error into [`DirectoryError`].
    ///
    /// `subject` is the DN the operation was targeting.
    pub fn from_ldap(err: ldap3::LdapError, url: &str, subject: &str) -> Self {
        match err {
            ldap3::LdapError::LdapResult { result } => match result.rc {
                32 => Self::NoSuchObject(subject.to_string()),
                34 => Self::InvalidDnSyntax(subject.to_string()),
                49 => Self::InvalidCredentials(subject.to_string()),
                rc => Self::Protocol(format!("rc={rc} {}", result.text)),
            },
            other => Self::Unavailable {
                url: url.to_string(),
                message: other.to_string(),
            },
        }
    }

    /// Whether the error only means "nothing there".
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::NoSuchObject(_) | Self::InvalidDnSyntax(_))
    }
}
