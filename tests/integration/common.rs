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
//! Test database and service state.
use eyre::{Result, WrapErr};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbConn, EntityTrait,
    schema::Schema,
};
use std::sync::Arc;

use keystone_ldap_sql::config::{Config, PasswordHashingAlgo};
use keystone_ldap_sql::db::entity::prelude as entity;
use keystone_ldap_sql::keystone::{Service, ServiceState};
use keystone_ldap_sql::plugin_manager::PluginManager;
use keystone_ldap_sql::provider::Provider;

/// Create the table of the entity.
async fn create_table<C, E>(conn: &C, schema: &Schema, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    conn.execute(
        conn.get_database_backend()
            .build(&schema.create_table_from_entity(entity)),
    )
    .await?;
    Ok(())
}

/// Create tables in the order of the foreign references.
pub async fn setup_schema(db: &DbConn) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, entity::Service).await?;
    create_table(db, &schema, entity::Endpoint).await?;
    create_table(db, &schema, entity::User).await?;
    create_table(db, &schema, entity::Tenant).await?;
    create_table(db, &schema, entity::UserTenantMembership).await?;
    create_table(db, &schema, entity::Role).await?;
    create_table(db, &schema, entity::Metadata).await?;
    create_table(db, &schema, entity::Ec2Credential).await?;
    Ok(())
}

/// Connect to the database given by `DATABASE_URL` (in-memory sqlite by
/// default) and create the schema.
pub async fn get_database() -> Result<DatabaseConnection> {
    let db_conn = std::env::var("DATABASE_URL").unwrap_or("sqlite::memory:".to_string());
    let opts = ConnectOptions::new(&db_conn).sqlx_logging(false).to_owned();
    let db = Database::connect(opts)
        .await
        .wrap_err_with(|| format!("Failed to connect to database at {db_conn}"))?;
    setup_schema(&db).await?;
    Ok(db)
}

/// Test configuration with the cheap password hashing.
pub fn get_config() -> Config {
    let mut cfg = Config::default();
    cfg.identity.password_hashing_algorithm = PasswordHashingAlgo::Bcrypt;
    cfg.identity.password_hash_rounds = Some(4);
    cfg
}

/// Service state with the providers built from the configuration.
pub async fn get_state_with(cfg: Config) -> Result<ServiceState> {
    let db = get_database().await?;
    let provider = Provider::new(cfg.clone(), PluginManager::default())?;
    Ok(Arc::new(Service::new(cfg, db, provider)?))
}

pub async fn get_state() -> Result<ServiceState> {
    get_state_with(get_config()).await
}
