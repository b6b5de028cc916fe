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
//! EC2 credentials.
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::BuilderError;

/// EC2 access key pair of the user.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Ec2Credential {
    /// Access key. This is the identifier of the credential.
    #[validate(length(min = 1, max = 255))]
    pub access: String,

    /// Secret key.
    #[builder(default)]
    pub secret: Option<String>,

    /// Owner of the credential. DN of the entry for the directory users.
    pub user_id: String,

    /// Tenant the credential is scoped to.
    #[builder(default)]
    pub tenant_id: Option<String>,
}

/// EC2 credential creation data.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Ec2CredentialCreate {
    /// Access key. Generated when unset.
    #[builder(default)]
    #[validate(length(min = 1, max = 255))]
    pub access: Option<String>,

    /// Secret key. Generated when unset.
    #[builder(default)]
    #[validate(length(min = 1, max = 255))]
    pub secret: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub user_id: String,

    #[builder(default)]
    #[validate(length(min = 1, max = 64))]
    pub tenant_id: Option<String>,
}
