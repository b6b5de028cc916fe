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
//! # EC2 credentials provider
//!
//! EC2 style credentials are long lived access and secret key pairs of the
//! user, optionally scoped to the tenant. They are used by the EC2
//! compatibility layer to sign the requests.
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::config::Config;
use crate::ec2::backend::{Ec2Backend, LdapSqlBackend, SqlBackend};
use crate::keystone::ServiceState;
use crate::plugin_manager::PluginManager;
pub use error::Ec2ProviderError;
#[cfg(test)]
pub use mock::MockEc2Provider;
pub use types::*;

pub struct Ec2Provider {
    backend_driver: Arc<dyn Ec2Backend>,
}

impl Ec2Provider {
    pub fn new(config: &Config, plugin_manager: &PluginManager) -> Result<Self, Ec2ProviderError> {
        let backend_driver: Arc<dyn Ec2Backend> = if let Some(driver) =
            plugin_manager.get_ec2_backend(config.ec2.driver.clone())
        {
            driver.clone()
        } else {
            match config.ec2.driver.as_str() {
                "sql" => Arc::new(SqlBackend::default()),
                "ldap_sql" => Arc::new(LdapSqlBackend::new(config)),
                _ => {
                    return Err(Ec2ProviderError::UnsupportedDriver(
                        config.ec2.driver.clone(),
                    ));
                }
            }
        };
        Ok(Self { backend_driver })
    }
}

#[async_trait]
impl Ec2Api for Ec2Provider {
    /// Create the credential
    #[tracing::instrument(level = "info", skip(self, state, credential))]
    async fn create_credential(
        &self,
        state: &ServiceState,
        credential: Ec2CredentialCreate,
    ) -> Result<Ec2Credential, Ec2ProviderError> {
        let mut new = credential;
        if new.access.is_none() {
            new.access = Some(Uuid::new_v4().simple().to_string());
        }
        if new.secret.is_none() {
            new.secret = Some(Uuid::new_v4().simple().to_string());
        }
        new.validate()?;
        self.backend_driver.create_credential(state, new).await
    }

    /// Get the credential
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_credential<'a>(
        &self,
        state: &ServiceState,
        access: &'a str,
    ) -> Result<Ec2Credential, Ec2ProviderError> {
        self.backend_driver
            .get_credential(state, access)
            .await?
            .ok_or_else(|| Ec2ProviderError::CredentialNotFound(access.to_string()))
    }

    /// List credentials of the user
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn list_credentials<'a>(
        &self,
        state: &ServiceState,
        user_id: &'a str,
    ) -> Result<Vec<Ec2Credential>, Ec2ProviderError> {
        self.backend_driver.list_credentials(state, user_id).await
    }

    /// Delete the credential
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_credential<'a>(
        &self,
        state: &ServiceState,
        access: &'a str,
    ) -> Result<(), Ec2ProviderError> {
        self.backend_driver.delete_credential(state, access).await
    }
}
