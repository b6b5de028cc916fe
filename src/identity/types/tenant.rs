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
use validator::Validate;

use crate::error::BuilderError;

/// Tenant (project).
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Tenant {
    /// The tenant ID.
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    /// The tenant name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// The tenant description.
    #[builder(default)]
    pub description: Option<String>,

    /// If the tenant is enabled, this value is true.
    #[builder(default = "true")]
    pub enabled: bool,

    /// Additional tenant properties.
    #[builder(default)]
    pub extra: Option<Value>,
}

/// Tenant creation data.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct TenantCreate {
    /// The tenant ID. When unset a new UUID is assigned.
    #[builder(default)]
    #[validate(length(min = 1, max = 64))]
    pub id: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[builder(default)]
    #[validate(length(max = 65535))]
    pub description: Option<String>,

    /// Defaults to true.
    #[builder(default)]
    pub enabled: Option<bool>,

    #[builder(default)]
    pub extra: Option<Value>,
}

/// Tenant update data. Unset fields are not modified.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct TenantUpdate {
    #[builder(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[builder(default)]
    #[validate(length(max = 65535))]
    pub description: Option<String>,

    #[builder(default)]
    pub enabled: Option<bool>,

    /// Additional tenant properties, merged into the existing ones.
    #[builder(default)]
    pub extra: Option<Value>,
}
