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
use serde::Deserialize;
use std::collections::BTreeMap;

/// Global options of the `[DEFAULT]` section.
///
/// The values are also the process wide variables available to the endpoint
/// URL templates of the catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct DefaultSection {
    /// Debug logging.
    #[serde(default)]
    pub debug: bool,

    /// Host the services are bound to.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// Port of the public API.
    #[serde(default = "default_public_port")]
    pub public_port: u16,

    /// Port of the admin API.
    #[serde(default = "default_admin_port")]
    pub admin_port: u16,

    /// Port of the compute API.
    #[serde(default = "default_compute_port")]
    pub compute_port: u16,

    /// Public endpoint base URL.
    pub public_endpoint: Option<String>,

    /// Admin endpoint base URL.
    pub admin_endpoint: Option<String>,
}

impl Default for DefaultSection {
    fn default() -> Self {
        Self {
            debug: false,
            bind_host: default_bind_host(),
            public_port: default_public_port(),
            admin_port: default_admin_port(),
            compute_port: default_compute_port(),
            public_endpoint: None,
            admin_endpoint: None,
        }
    }
}

impl DefaultSection {
    /// Variables exposed to the endpoint URL templates.
    pub fn template_values(&self) -> BTreeMap<String, String> {
        let mut values = BTreeMap::from([
            ("bind_host".to_string(), self.bind_host.clone()),
            ("public_port".to_string(), self.public_port.to_string()),
            ("admin_port".to_string(), self.admin_port.to_string()),
            ("compute_port".to_string(), self.compute_port.to_string()),
        ]);
        if let Some(val) = &self.public_endpoint {
            values.insert("public_endpoint".into(), val.clone());
        }
        if let Some(val) = &self.admin_endpoint {
            values.insert("admin_endpoint".into(), val.clone());
        }
        values
    }
}

fn default_bind_host() -> String {
    "0.0.0.0".into()
}

fn default_public_port() -> u16 {
    5000
}

fn default_admin_port() -> u16 {
    35357
}

fn default_compute_port() -> u16 {
    8774
}
