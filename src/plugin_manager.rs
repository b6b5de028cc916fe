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
//! # Plugin manager
//!
//! A driver, also known as a backend, is an abstraction around the data access
//! needed by a particular subsystem. Besides the built-in `sql` and
//! `ldap_sql` drivers custom backends may be registered under a name and
//! selected with the `driver` option of the corresponding configuration
//! section.
//!
//! The [PluginManager] is responsible for picking the proper backend driver for
//! the provider.
use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::backend::CatalogBackend;
use crate::ec2::backend::Ec2Backend;
use crate::identity::backend::IdentityBackend;

/// Plugin manager allowing to pass custom backend plugins implementing required
/// trait during the service start.
#[derive(Clone, Default)]
pub struct PluginManager {
    /// Catalog backend plugins.
    catalog_backends: HashMap<String, Arc<dyn CatalogBackend>>,
    /// EC2 credentials backend plugins.
    ec2_backends: HashMap<String, Arc<dyn Ec2Backend>>,
    /// Identity backend plugins.
    identity_backends: HashMap<String, Arc<dyn IdentityBackend>>,
}

impl PluginManager {
    /// Register catalog backend.
    pub fn register_catalog_backend<S: AsRef<str>>(
        &mut self,
        name: S,
        plugin: Arc<dyn CatalogBackend>,
    ) {
        self.catalog_backends
            .insert(name.as_ref().to_string(), plugin);
    }

    /// Register EC2 credentials backend.
    pub fn register_ec2_backend<S: AsRef<str>>(&mut self, name: S, plugin: Arc<dyn Ec2Backend>) {
        self.ec2_backends.insert(name.as_ref().to_string(), plugin);
    }

    /// Register identity backend.
    pub fn register_identity_backend<S: AsRef<str>>(
        &mut self,
        name: S,
        plugin: Arc<dyn IdentityBackend>,
    ) {
        self.identity_backends
            .insert(name.as_ref().to_string(), plugin);
    }

    /// Get registered catalog backend.
    pub fn get_catalog_backend<S: AsRef<str>>(&self, name: S) -> Option<&Arc<dyn CatalogBackend>> {
        self.catalog_backends.get(name.as_ref())
    }

    /// Get registered EC2 credentials backend.
    pub fn get_ec2_backend<S: AsRef<str>>(&self, name: S) -> Option<&Arc<dyn Ec2Backend>> {
        self.ec2_backends.get(name.as_ref())
    }

    /// Get registered identity backend.
    pub fn get_identity_backend<S: AsRef<str>>(
        &self,
        name: S,
    ) -> Option<&Arc<dyn IdentityBackend>> {
        self.identity_backends.get(name.as_ref())
    }
}
