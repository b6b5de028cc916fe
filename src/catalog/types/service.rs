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

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

use crate::error::BuilderError;

/// Service.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Service {
    /// The service ID.
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    /// The service type (`compute`, `identity`, ...).
    #[builder(default)]
    #[serde(rename = "type")]
    #[validate(length(max = 255))]
    pub r#type: Option<String>,

    /// The service name.
    #[builder(default)]
    pub name: Option<String>,

    /// Additional service properties.
    #[builder(default)]
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Service creation data.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct ServiceCreate {
    /// The service ID. When unset a new UUID is assigned.
    #[builder(default)]
    #[validate(length(min = 1, max = 64))]
    pub id: Option<String>,

    #[builder(default)]
    #[serde(rename = "type")]
    #[validate(length(max = 255))]
    pub r#type: Option<String>,

    #[builder(default)]
    pub name: Option<String>,

    #[builder(default)]
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Service update data. Unset fields are not modified, `extra` is merged.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct ServiceUpdate {
    #[builder(default)]
    #[serde(rename = "type")]
    #[validate(length(max = 255))]
    pub r#type: Option<String>,

    #[builder(default)]
    pub name: Option<String>,

    #[builder(default)]
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Service listing filters.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
pub struct ServiceListParameters {
    /// Filter services by the type.
    #[validate(length(max = 255))]
    pub r#type: Option<String>,
}
