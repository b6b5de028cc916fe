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
//! # Keystone configuration
//!
//! Helpers for parsing the `keystone.conf` values.
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Comma separated list of values. Blank entries are skipped.
pub fn csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?
        .split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(Into::into)
        .collect())
}

/// Attribute mapping written as `field:attribute` comma separated pairs.
pub fn attribute_mapping<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let mut mapping = BTreeMap::new();
    for pair in raw.split(',').map(str::trim).filter(|x| !x.is_empty()) {
        match pair.split_once(':') {
            Some((field, attr)) if !field.trim().is_empty() && !attr.trim().is_empty() => {
                mapping.insert(field.trim().to_string(), attr.trim().to_string());
            }
            _ => {
                return Err(serde::de::Error::custom(format!(
                    "invalid attribute mapping entry `{pair}`, expected `field:attribute`"
                )));
            }
        }
    }
    Ok(mapping)
}

pub fn default_sql_driver() -> String {
    "sql".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error as ValueError, StrDeserializer};

    fn de(val: &str) -> StrDeserializer<'_, ValueError> {
        val.into_deserializer()
    }

    #[test]
    fn test_csv() {
        assert_eq!(csv(de("a, b,,c ")).unwrap(), vec!["a", "b", "c"]);
        assert!(csv(de("")).unwrap().is_empty());
    }

    #[test]
    fn test_attribute_mapping() {
        let mapping = attribute_mapping(de("name:cn, email:mail")).unwrap();
        assert_eq!(mapping.get("name"), Some(&"cn".to_string()));
        assert_eq!(mapping.get("email"), Some(&"mail".to_string()));
        assert!(attribute_mapping(de("")).unwrap().is_empty());
        assert!(attribute_mapping(de("name")).is_err());
        assert!(attribute_mapping(de("name:")).is_err());
    }
}
