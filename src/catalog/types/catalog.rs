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
//! Catalog as returned to the authenticated user.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Endpoint of the service as seen in the catalog.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Endpoint ID.
    pub id: String,

    /// Service name.
    pub name: Option<String>,

    #[serde(rename = "publicURL")]
    pub public_url: String,

    #[serde(rename = "internalURL")]
    pub internal_url: Option<String>,

    #[serde(rename = "adminURL")]
    pub admin_url: Option<String>,
}

/// Region name to service type to the endpoint.
///
/// Endpoints without region are listed under the empty region name, services
/// without type under the empty type.
pub type Catalog = BTreeMap<String, BTreeMap<String, CatalogEntry>>;
