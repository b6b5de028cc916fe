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
//! Directory connection and the directory to Keystone object mapping.
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::config::common::{attribute_mapping, csv};

/// The `[ldap]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct LdapSection {
    /// Directory server URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// DN used by the service to bind for the searches.
    #[serde(default)]
    pub user: String,

    /// Password of the service bind DN.
    #[serde(default = "default_password")]
    pub password: SecretString,

    #[serde(default = "default_tree_dn")]
    pub user_tree_dn: String,
    #[serde(default = "default_id_attribute")]
    pub user_id_attribute: String,
    #[serde(default = "default_objectclass")]
    pub user_objectclass: String,
    #[serde(default, deserialize_with = "attribute_mapping")]
    pub user_attribute_mapping: BTreeMap<String, String>,

    #[serde(default = "default_tree_dn")]
    pub ec2_tree_dn: String,
    #[serde(default = "default_id_attribute")]
    pub ec2_id_attribute: String,
    #[serde(default = "default_objectclass")]
    pub ec2_objectclass: String,
    #[serde(default, deserialize_with = "attribute_mapping")]
    pub ec2_attribute_mapping: BTreeMap<String, String>,

    /// Name of the tenant every directory user belongs to.
    pub default_tenant: Option<String>,

    /// Names of the roles every directory user has on the default tenant.
    #[serde(default, deserialize_with = "csv")]
    pub default_roles: Vec<String>,
}

/// Where and how one kind of Keystone object is stored in the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryObjectSection {
    /// Base DN of the searches.
    pub tree_dn: String,
    /// Attribute holding the object name.
    pub id_attribute: String,
    /// Object class the entries must have.
    pub objectclass: String,
    /// Logical field name to directory attribute name.
    pub attribute_mapping: BTreeMap<String, String>,
}

impl LdapSection {
    /// Directory mapping of the users.
    pub fn user(&self) -> DirectoryObjectSection {
        DirectoryObjectSection {
            tree_dn: self.user_tree_dn.clone(),
            id_attribute: self.user_id_attribute.clone(),
            objectclass: self.user_objectclass.clone(),
            attribute_mapping: self.user_attribute_mapping.clone(),
        }
    }

    /// Directory mapping of the EC2 credentials.
    pub fn ec2(&self) -> DirectoryObjectSection {
        DirectoryObjectSection {
            tree_dn: self.ec2_tree_dn.clone(),
            id_attribute: self.ec2_id_attribute.clone(),
            objectclass: self.ec2_objectclass.clone(),
            attribute_mapping: self.ec2_attribute_mapping.clone(),
        }
    }
}

impl Default for LdapSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            user: String::new(),
            password: default_password(),
            user_tree_dn: default_tree_dn(),
            user_id_attribute: default_id_attribute(),
            user_objectclass: default_objectclass(),
            user_attribute_mapping: BTreeMap::new(),
            ec2_tree_dn: default_tree_dn(),
            ec2_id_attribute: default_id_attribute(),
            ec2_objectclass: default_objectclass(),
            ec2_attribute_mapping: BTreeMap::new(),
            default_tenant: None,
            default_roles: Vec::new(),
        }
    }
}

fn default_url() -> String {
    "ldap://localhost".into()
}

fn default_password() -> SecretString {
    SecretString::from("")
}

fn default_tree_dn() -> String {
    "ou=Users,dc=example,dc=com".into()
}

fn default_id_attribute() -> String {
    "uid".into()
}

fn default_objectclass() -> String {
    "top".into()
}
