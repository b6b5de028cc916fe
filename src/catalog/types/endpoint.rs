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

/// Endpoint.
///
/// The URLs are templates which are expanded while assembling the catalog.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Endpoint {
    /// The endpoint ID.
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    /// The region of the endpoint.
    #[builder(default)]
    #[validate(length(max = 255))]
    pub region: Option<String>,

    /// The ID of the service the endpoint belongs to.
    #[validate(length(min = 1, max = 64))]
    pub service_id: String,

    /// Public URL template.
    #[builder(default)]
    pub publicurl: Option<String>,

    /// Internal URL template.
    #[builder(default)]
    pub internalurl: Option<String>,

    /// Admin URL template.
    #[builder(default)]
    pub adminurl: Option<String>,

    /// Additional endpoint properties.
    #[builder(default)]
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Endpoint creation data.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct EndpointCreate {
    /// The endpoint ID. When unset a new UUID is assigned.
    #[builder(default)]
    #[validate(length(min = 1, max = 64))]
    pub id: Option<String>,

    #[builder(default)]
    #[validate(length(max = 255))]
    pub region: Option<String>,

    /// Must reference an existing service.
    #[validate(length(min = 1, max = 64))]
    pub service_id: String,

    #[builder(default)]
    pub publicurl: Option<String>,

    #[builder(default)]
    pub internalurl: Option<String>,

    #[builder(default)]
    pub adminurl: Option<String>,

    #[builder(default)]
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Endpoint update data. Unset fields are not modified, `extra` is merged.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct EndpointUpdate {
    #[builder(default)]
    #[validate(length(max = 255))]
    pub region: Option<String>,

    #[builder(default)]
    #[validate(length(min = 1, max = 64))]
    pub service_id: Option<String>,

    #[builder(default)]
    pub publicurl: Option<String>,

    #[builder(default)]
    pub internalurl: Option<String>,

    #[builder(default)]
    pub adminurl: Option<String>,

    #[builder(default)]
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Endpoint listing filters.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct EndpointListParameters {
    /// Filter endpoints by the service.
    #[builder(default)]
    #[validate(length(max = 64))]
    pub service_id: Option<String>,

    /// Filter endpoints by the region.
    #[builder(default)]
    #[validate(length(max = 255))]
    pub region: Option<String>,
}
