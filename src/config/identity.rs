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

use crate::config::common::default_sql_driver;

/// Identity provider.
#[derive(Debug, Deserialize, Clone)]
pub struct IdentitySection {
    /// Identity backend driver: `sql` or `ldap_sql`.
    #[serde(default = "default_sql_driver")]
    pub driver: String,

    /// Maximal password length.
    #[serde(default = "default_max_password_length")]
    pub max_password_length: usize,

    /// Password hashing algorithm.
    #[serde(default)]
    pub password_hashing_algorithm: PasswordHashingAlgo,

    /// Number of password hashing rounds.
    pub password_hash_rounds: Option<usize>,
}

impl Default for IdentitySection {
    fn default() -> Self {
        Self {
            driver: default_sql_driver(),
            max_password_length: default_max_password_length(),
            password_hashing_algorithm: PasswordHashingAlgo::Bcrypt,
            password_hash_rounds: None,
        }
    }
}

/// Password hashing algorithm.
#[derive(Debug, Default, Deserialize, Clone)]
pub enum PasswordHashingAlgo {
    #[default]
    #[serde(alias = "bcrypt")]
    Bcrypt,
    /// Plain text. Only for tests where an expected value is necessary.
    #[cfg(test)]
    None,
}

fn default_max_password_length() -> usize {
    4096
}
