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

/// User as returned by the identity backends. Never carries the password.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct UserResponse {
    /// The user ID. DN of the entry for the directory users.
    #[validate(length(min = 1))]
    pub id: String,

    /// The user name.
    #[validate(length(max = 255))]
    pub name: String,

    /// If the user is enabled, this value is true.
    #[builder(default = "true")]
    pub enabled: bool,

    /// Additional user properties.
    #[builder(default)]
    pub extra: Option<Value>,
}

/// User creation data.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct UserCreate {
    /// The ID of the user. When unset a new UUID is assigned.
    #[builder(default)]
    #[validate(length(min = 1, max = 64))]
    pub id: Option<String>,

    /// The user name. Must be unique.
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// User password.
    #[builder(default)]
    #[validate(length(max = 4096))]
    pub password: Option<String>,

    /// Whether the user is enabled. Defaults to true.
    #[builder(default)]
    pub enabled: Option<bool>,

    /// Additional user properties.
    #[builder(default)]
    pub extra: Option<Value>,
}

/// User update data. Unset fields are not modified.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct UserUpdate {
    /// The user ID can not be changed, it may only repeat the current one.
    #[builder(default)]
    pub id: Option<String>,

    /// New user name.
    #[builder(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    /// New user password.
    #[builder(default)]
    #[validate(length(max = 4096))]
    pub password: Option<String>,

    #[builder(default)]
    pub enabled: Option<bool>,

    /// Additional user properties, merged into the existing ones.
    #[builder(default)]
    pub extra: Option<Value>,
}
