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
use std::collections::BTreeMap;

/// Per user and tenant metadata.
///
/// Holds the IDs of the roles granted to the user on the tenant together with
/// any other keys stored by the older deployments.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Metadata {
    /// Granted role IDs.
    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn with_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_serde() {
        let metadata: Metadata =
            serde_json::from_value(json!({"roles": ["r1", "r2"], "is_admin": true})).unwrap();
        assert_eq!(metadata.roles, vec!["r1", "r2"]);
        assert_eq!(metadata.extra.get("is_admin"), Some(&json!(true)));
        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            json!({"roles": ["r1", "r2"], "is_admin": true})
        );

        let metadata: Metadata = serde_json::from_value(json!({})).unwrap();
        assert!(metadata.roles.is_empty());
    }
}
