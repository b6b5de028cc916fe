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
//! # Configuration
//!
//! The configuration is read from the `keystone.conf` INI file. Every
//! component receives the parsed [`Config`] (or the relevant section) when it
//! is constructed.
use config::{File, FileFormat};
use eyre::{Report, WrapErr};
use serde::Deserialize;
use std::path::PathBuf;

mod catalog;
pub mod common;
mod database;
mod default;
mod ec2;
mod identity;
mod ldap;
mod ldapauthz;

pub use catalog::CatalogSection;
pub use database::DatabaseSection;
pub use default::DefaultSection;
pub use ec2::Ec2Section;
pub use identity::{IdentitySection, PasswordHashingAlgo};
pub use ldap::{DirectoryObjectSection, LdapSection};
pub use ldapauthz::LdapAuthzSection;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    /// Global configuration options.
    #[serde(rename = "DEFAULT", alias = "default", default)]
    pub default: DefaultSection,

    /// Catalog provider configuration.
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseSection,

    /// EC2 credentials provider configuration.
    #[serde(default)]
    pub ec2: Ec2Section,

    /// Identity provider configuration.
    #[serde(default)]
    pub identity: IdentitySection,

    /// Directory (LDAP) connection and mapping.
    #[serde(default)]
    pub ldap: LdapSection,

    /// Remote user authorization.
    #[serde(default)]
    pub ldapauthz: LdapAuthzSection,
}

impl Config {
    pub fn new(path: PathBuf) -> Result<Self, Report> {
        let mut builder = config::Config::builder();

        if std::path::Path::new(&path).is_file() {
            builder = builder.add_source(File::from(path).format(FileFormat::Ini));
        }

        builder.try_into()
    }
}

impl TryFrom<config::ConfigBuilder<config::builder::DefaultState>> for Config {
    type Error = Report;
    fn try_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Self::Error> {
        let mut builder = builder;
        builder = builder
            .set_default("identity.driver", "sql")?
            .set_default("catalog.driver", "sql")?
            .set_default("ec2.driver", "sql")?;

        builder
            .build()
            .wrap_err("Failed to read configuration file")?
            .try_deserialize()
            .wrap_err("Failed to parse configuration file")
    }
}
