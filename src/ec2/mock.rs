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

use crate::config::Config;
use crate::ec2::{Ec2Api, Ec2ProviderError, types::*};
use crate::keystone::ServiceState;
use crate::plugin_manager::PluginManager;

#[cfg(test)]
mock! {
    pub Ec2Provider {
        pub fn new(cfg: &Config, plugin_manager: &PluginManager) -> Result<Self, Ec2ProviderError>;
    }

    #[async_trait]
    impl Ec2Api for Ec2Provider {
        async fn create_credential(
            &self,
            state: &ServiceState,
            credential: Ec2CredentialCreate,
        ) -> Result<Ec2Credential, Ec2ProviderError>;

        async fn get_credential<'a>(
            &self,
            state: &ServiceState,
            access: &'a str,
        ) -> Result<Ec2Credential, Ec2ProviderError>;

        async fn list_credentials<'a>(
            &self,
            state: &ServiceState,
            user_id: &'a str,
        ) -> Result<Vec<Ec2Credential>, Ec2ProviderError>;

        async fn delete_credential<'a>(
            &self,
            state: &ServiceState,
            access: &'a str,
        ) -> Result<(), Ec2ProviderError>;
    }
}
