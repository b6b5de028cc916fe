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

use crate::ec2::Ec2ProviderError;
use crate::ec2::types::*;
use crate::keystone::ServiceState;

pub use ldap_sql::LdapSqlBackend;
pub use sql::SqlBackend;

/// EC2 credentials storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Ec2Backend: Send + Sync {
    /// Store the credential. The access key must be set.
    async fn create_credential(
        &self,
        state: &ServiceState,
        credential: Ec2CredentialCreate,
    ) -> Result<Ec2Credential, Ec2ProviderError>;

    /// Get the credential by the access key.
    async fn get_credential<'a>(
        &self,
        state: &ServiceState,
        access: &'a str,
    ) -> Result<Option<Ec2Credential>, Ec2ProviderError>;

    /// List credentials of the user.
    async fn list_credentials<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Vec<Ec2Credential>, Ec2ProviderError>;

    /// Delete the credential.
    async fn delete_credential<'a>(
        &self,
        state: &ServiceState,
        access: &'a str,
    ) -> Result<(), Ec2ProviderError>;
}
