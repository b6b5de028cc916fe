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
use crate::catalog::{CatalogProviderError, types::Service};
use crate::db::entity::service as db_service;

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

impl TryFrom<db_service::Model> for Service {
    type Error = CatalogProviderError;

    fn try_from(value: db_service::Model) -> Result<Self, Self::Error> {
        let mut extra = parse_extra(value.extra.as_deref(), "service", &value.id);
        let name = take_string(&mut extra, "name");
        Ok(Service {
            id: value.id,
            r#type: value.r#type,
            name,
            extra,
        })
    }
}

/// Serialize the service name together with the open attributes.
fn to_extra(
    name: Option<String>,
    mut extra: BTreeMap<String, Value>,
) -> Result<String, CatalogProviderError> {
    if let Some(name) = name {
        extra.insert("name".into(), Value::String(name));
    }
    Ok(serde_json::to_string(&extra)?)
}
