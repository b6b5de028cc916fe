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
//! # Endpoint URL templates
//!
//! Stored endpoint URLs may reference variables as `{name}` or with the
//! legacy `$(name)s` syntax.
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::error;

use crate::catalog::CatalogProviderError;

static TEMPLATE_VARIABLE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\$\((\w+)\)s|\{(\w+)\}"));

/// Expand the URL template with the values.
///
/// Every variable must be present in `values`.
pub fn format_url<S: AsRef<str>>(
    template: S,
    values: &BTreeMap<String, String>,
) -> Result<String, CatalogProviderError> {
    let template = template.as_ref();
    let re = TEMPLATE_VARIABLE
        .as_ref()
        .map_err(|e| CatalogProviderError::Driver(e.to_string()))?;
    let malformed = || CatalogProviderError::MalformedEndpoint(template.to_string());

    let mut res = String::with_capacity(template.len());
    let mut last = 0;
    for caps in re.captures_iter(template) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1).or_else(|| caps.get(2)))
        else {
            continue;
        };
        let literal = &template[last..whole.start()];
        if literal.contains("$(") {
            error!("Malformed endpoint {template} - incomplete format");
            return Err(malformed());
        }
        let Some(val) = values.get(key.as_str()) else {
            error!("Malformed endpoint {template} - unknown key {}", key.as_str());
            return Err(malformed());
        };
        res.push_str(literal);
        res.push_str(val);
        last = whole.end();
    }
    let rest = &template[last..];
    if rest.contains("$(") {
        error!("Malformed endpoint {template} - incomplete format");
        return Err(malformed());
    }
    res.push_str(rest);
    Ok(res)
}
