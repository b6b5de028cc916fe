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
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::keystone::Service;
use crate::provider::{Provider, ProviderBuilder};

/// Service state with mocked providers and no database.
pub(crate) fn get_state_mock() -> Arc<Service> {
    get_state_mock_with(Provider::mocked_builder(), DatabaseConnection::Disconnected)
}

/// Service state with the given providers and database.
pub(crate) fn get_state_mock_with(provider: ProviderBuilder, db: DatabaseConnection) -> Arc<Service> {
    Arc::new(Service::new(Config::default(), db, provider.build().unwrap()).unwrap())
}
