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
//! # Keystone state
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::KeystoneError;
use crate::provider::Provider;

/// Shared state handed to every provider and backend call.
pub struct Service {
    /// Config file.
    pub config: Config,

    /// Database connection.
    pub db: DatabaseConnection,

    /// Service/resource Provider.
    pub provider: Provider,
}

pub type ServiceState = Arc<Service>;

impl Service {
    pub fn new(
        cfg: Config,
        db: DatabaseConnection,
        provider: Provider,
    ) -> Result<Self, KeystoneError> {
        info!(
            identity = cfg.identity.driver.as_str(),
            catalog = cfg.catalog.driver.as_str(),
            ec2 = cfg.ec2.driver.as_str(),
            "Initializing Keystone backends"
        );
        Ok(Self {
            config: cfg,
            db,
            provider,
        })
    }
}
