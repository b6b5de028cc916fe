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
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::LazyLock;

static DRIVER_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?<scheme>\w+)\+\w+://").ok());

/// Database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSection {
    /// Database URL. Python style driver suffixes (`mysql+pymysql://`) are
    /// accepted.
    #[serde(default = "default_connection")]
    pub connection: SecretString,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            connection: default_connection(),
        }
    }
}

fn default_connection() -> SecretString {
    SecretString::from("sqlite::memory:")
}

impl DatabaseSection {
    /// Connection URL with the driver suffix of the scheme removed.
    pub fn get_connection(&self) -> SecretString {
        let val = self.connection.expose_secret();
        match DRIVER_SUFFIX.as_ref() {
            Some(re) if re.is_match(val) => {
                SecretString::from(re.replace(val, "${scheme}://").to_string())
            }
            _ => self.connection.clone(),
        }
    }
}
