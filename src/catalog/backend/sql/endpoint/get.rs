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
use sea_orm::entity::*;

use crate::catalog::{CatalogProviderError, types::Endpoint};
use crate::db::entity::prelude::Endpoint as DbEndpoint;
use crate::error::DbContextExt;

pub async fn get<I: AsRef<str>>(
    db: &DatabaseConnection,
    id: I,
) -> Result<Option<Endpoint>, CatalogProviderError> {
    DbEndpoint::find_by_id(id.as_ref())
        .one(db)
        .await
        .context("fetching endpoint by ID")?
        .map(TryInto::try_into)
        .transpose()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};
    use serde_json::json;

    use super::super::tests::get_endpoint_mock;
    use super::*;

    #[tokio::test]
    async fn test_get() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_endpoint_mock("1")]])
            .into_connection();
        let endpoint = get(&db, "1").await.unwrap().unwrap();
        assert_eq!(endpoint.id, "1");
        assert_eq!(endpoint.service_id, "srv");
        assert_eq!(endpoint.region.as_deref(), Some("RegionOne"));
        assert_eq!(
            endpoint.publicurl.as_deref(),
            Some("http://localhost:$(public_port)s/v2.0")
        );
        assert_eq!(endpoint.internalurl, None);
        assert_eq!(
            endpoint.adminurl.as_deref(),
            Some("http://localhost:$(admin_port)s/v2.0")
        );
        assert_eq!(endpoint.extra.get("weight"), Some(&json!(3)));
        assert!(!endpoint.extra.contains_key("publicurl"));

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "endpoint"."id", "endpoint"."region", "endpoint"."service_id", "endpoint"."extra" FROM "endpoint" WHERE "endpoint"."id" = $1 LIMIT $2"#,
                ["1".into(), 1u64.into()]
            ),]
        );
    }
}
