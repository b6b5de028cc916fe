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

use serde_json::Value;
use std::collections::BTreeMap;

use super::{parse_extra, take_string};
use crate::catalog::{CatalogProviderError, types::Endpoint};
use crate::db::entity::endpoint as db_endpoint;

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::create;
pub use delete::delete;
pub use get::get;
pub use list::list;
pub use update::update;

/// Properties stored in `extra` and exposed as endpoint attributes.
const URL_KEYS: [&str; 3] = ["publicurl", "internalurl", "adminurl"];

impl TryFrom<db_endpoint::Model> for Endpoint {
    type Error = CatalogProviderError;

    fn try_from(value: db_endpoint::Model) -> Result<Self, Self::Error> {
        let mut extra = parse_extra(value.extra.as_deref(), "endpoint", &value.id);
        let [publicurl, internalurl, adminurl] = URL_KEYS.map(|key| take_string(&mut extra, key));
        Ok(Endpoint {
            id: value.id,
            region: value.region,
            service_id: value.service_id,
            publicurl,
            internalurl,
            adminurl,
            extra,
        })
    }
}

/// Serialize the URL templates together with the open attributes.
fn to_extra(
    urls: [Option<String>; 3],
    mut extra: BTreeMap<String, Value>,
) -> Result<String, CatalogProviderError> {
    for (key, url) in URL_KEYS.into_iter().zip(urls) {
        if let Some(url) = url {
            extra.insert(key.into(), Value::String(url));
        }
    }
    Ok(serde_json::to_string(&extra)?)
}
