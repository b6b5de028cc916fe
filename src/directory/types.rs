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
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::config::DirectoryObjectSection;

/// Search scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchScope {
    /// Only the entry named by the base DN.
    Base,
    /// The base entry and everything below it.
    Subtree,
}

impl From<SearchScope> for ldap3::Scope {
    fn from(value: SearchScope) -> Self {
        match value {
            SearchScope::Base => ldap3::Scope::Base,
            SearchScope::Subtree => ldap3::Scope::Subtree,
        }
    }
}

/// Entry as returned by the directory server.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawEntry {
    pub dn: String,
    pub attributes: HashMap<String, Vec<String>>,
}

/// Decoded attribute value.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DirectoryValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl DirectoryValue {
    /// Decode the raw directory string.
    ///
    /// `TRUE` and `FALSE` become booleans and numeric strings become integers.
    pub fn decode<S: AsRef<str>>(raw: S) -> Self {
        let raw = raw.as_ref();
        match raw {
            "TRUE" => Self::Bool(true),
            "FALSE" => Self::Bool(false),
            other => other
                .trim()
                .parse::<i64>()
                .map(Self::Int)
                .unwrap_or_else(|_| Self::String(other.to_string())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(val) => Some(*val),
            _ => None,
        }
    }
}

impl fmt::Display for DirectoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Int(val) => write!(f, "{val}"),
            Self::String(val) => f.write_str(val),
        }
    }
}

impl From<DirectoryValue> for Value {
    fn from(value: DirectoryValue) -> Self {
        match value {
            DirectoryValue::Bool(val) => Value::Bool(val),
            DirectoryValue::Int(val) => Value::from(val),
            DirectoryValue::String(val) => Value::String(val),
        }
    }
}

/// Directory entry decoded with the attribute mapping of the object kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectoryRecord {
    /// DN of the entry. This is the identifier of the record.
    pub dn: String,
    /// Value of the configured id attribute.
    pub name: Option<String>,
    /// Logical field name to the first decoded value of the mapped attribute.
    /// Mapped attributes absent from the entry are `None`.
    pub attributes: BTreeMap<String, Option<DirectoryValue>>,
}

impl DirectoryRecord {
    /// Decode the raw entry.
    pub fn from_entry(entry: RawEntry, object: &DirectoryObjectSection) -> Self {
        let first = |attr: &str| -> Option<&String> {
            entry
                .attributes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(attr))
                .and_then(|(_, values)| values.first())
        };
        let name = first(&object.id_attribute).cloned();
        let attributes = object
            .attribute_mapping
            .iter()
            .map(|(field, attr)| (field.clone(), first(attr).map(DirectoryValue::decode)))
            .collect();
        Self {
            dn: entry.dn,
            name,
            attributes,
        }
    }

    /// Decoded value of the logical field.
    pub fn get<S: AsRef<str>>(&self, field: S) -> Option<&DirectoryValue> {
        self.attributes.get(field.as_ref()).and_then(Option::as_ref)
    }

    /// Logical field as string.
    pub fn get_string<S: AsRef<str>>(&self, field: S) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object() -> DirectoryObjectSection {
        DirectoryObjectSection {
            tree_dn: "ou=Users,dc=example,dc=com".into(),
            id_attribute: "uid".into(),
            objectclass: "inetOrgPerson".into(),
            attribute_mapping: BTreeMap::from([
                ("name".into(), "cn".into()),
                ("email".into(), "mail".into()),
                ("enabled".into(), "accountActive".into()),
                ("uidnumber".into(), "uidNumber".into()),
            ]),
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(DirectoryValue::decode("TRUE"), DirectoryValue::Bool(true));
        assert_eq!(DirectoryValue::decode("FALSE"), DirectoryValue::Bool(false));
        assert_eq!(
            DirectoryValue::decode("true"),
            DirectoryValue::String("true".into())
        );
        assert_eq!(DirectoryValue::decode("1001"), DirectoryValue::Int(1001));
        assert_eq!(DirectoryValue::decode(" -7 "), DirectoryValue::Int(-7));
        assert_eq!(
            DirectoryValue::decode("10.5"),
            DirectoryValue::String("10.5".into())
        );
        assert_eq!(DirectoryValue::decode("1001").to_string(), "1001");
    }

    #[test]
    fn test_record_from_entry() {
        let entry = RawEntry {
            dn: "uid=jdoe,ou=Users,dc=example,dc=com".into(),
            attributes: HashMap::from([
                ("uid".into(), vec!["jdoe".into()]),
                ("cn".into(), vec!["John Doe".into(), "Johnny".into()]),
                ("accountactive".into(), vec!["TRUE".into()]),
                ("uidNumber".into(), vec!["1001".into()]),
                ("userPassword".into(), vec!["{SSHA}secret".into()]),
            ]),
        };
        let record = DirectoryRecord::from_entry(entry, &object());
        assert_eq!(record.dn, "uid=jdoe,ou=Users,dc=example,dc=com");
        assert_eq!(record.name, Some("jdoe".into()));
        assert_eq!(
            record.get("name"),
            Some(&DirectoryValue::String("John Doe".into()))
        );
        assert_eq!(record.get("enabled"), Some(&DirectoryValue::Bool(true)));
        assert_eq!(record.get("uidnumber"), Some(&DirectoryValue::Int(1001)));
        assert_eq!(record.attributes.get("email"), Some(&None));
        assert!(!record.attributes.contains_key("password"));
        assert_eq!(record.attributes.len(), 4);
    }
}
