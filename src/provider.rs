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
//! # Provider manager
//!
//! Provider manager provides access to the individual service providers. This
//! gives an easy interact for passing overall manager down to the individual
//! providers that might need to call other providers (the EC2 credentials
//! resolve the default tenant through the identity provider) while also
//! allowing an easy injection of mocked providers.
use derive_builder::Builder;
use mockall_double::double;

use crate::catalog::CatalogApi;
#[double]
use crate::catalog::CatalogProvider;
use crate::config::Config;
use crate::ec2::Ec2Api;
#[double]
use crate::ec2::Ec2Provider;
use crate::error::KeystoneError;
use crate::identity::IdentityApi;
#[double]
use crate::identity::IdentityProvider;
use crate::plugin_manager::PluginManager;

/// Global provider manager.
#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct Provider {
    /// Configuration.
    pub config: Config,
    /// Catalog provider.
    catalog: CatalogProvider,
    /// EC2 credentials provider.
    ec2: Ec2Provider,
    /// Identity provider.
    identity: IdentityProvider,
}

impl Provider {
    pub fn new(cfg: Config, plugin_manager: PluginManager) -> Result<Self, KeystoneError> {
        let catalog_provider = CatalogProvider::new(&cfg, &plugin_manager)?;
        let ec2_provider = Ec2Provider::new(&cfg, &plugin_manager)?;
        let identity_provider = IdentityProvider::new(&cfg, &plugin_manager)?;

        Ok(Self {
            config: cfg,
            catalog: catalog_provider,
            ec2: ec2_provider,
            identity: identity_provider,
        })
    }

    /// Get the catalog provider.
    pub fn get_catalog_provider(&self) -> &impl CatalogApi {
        &self.catalog
    }

    /// Get the EC2 credentials provider.
    pub fn get_ec2_provider(&self) -> &impl Ec2Api {
        &self.ec2
    }

    /// Get the identity provider.
    pub fn get_identity_provider(&self) -> &impl IdentityApi {
        &self.identity
    }
}

#[cfg(test)]
impl Provider {
    pub fn mocked_builder() -> ProviderBuilder {
        let config = Config::default();
        let catalog_mock = crate::catalog::MockCatalogProvider::default();
        let ec2_mock = crate::ec2::MockEc2Provider::default();
        let identity_mock = crate::identity::MockIdentityProvider::default();

        ProviderBuilder::default()
            .config(config)
            .catalog(catalog_mock)
            .ec2(ec2_mock)
            .identity(identity_mock)
    }
}
