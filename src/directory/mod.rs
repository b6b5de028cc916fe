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
//! # Directory client
//!
//! Read only access to one kind of Keystone object (users, EC2 credentials)
//! stored in the directory.
//!
//! The client is stateless. Every operation opens a new connection, binds,
//! searches and unbinds again. Failures to bind or to reach the server are
//! logged and reported as "no result" so that the caller may fall back to the
//! database.
use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, warn};

pub mod connection;
pub mod dn;
pub mod error;
pub mod types;

use crate::config::{DirectoryObjectSection, LdapSection};
use connection::{DirectoryConnection, DirectoryConnector, Ldap3Connector};
pub use dn::{DistinguishedName, valid_dn};
use error::DirectoryError;
pub use types::{DirectoryRecord, DirectoryValue, RawEntry, SearchScope};

/// Lookups of the directory entries of one object kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch the entry by its DN.
    async fn get_by_dn<'a>(&self, dn: &'a str) -> Option<DirectoryRecord>;

    /// Find the entry by the value of the id attribute.
    async fn get_by_name<'a>(&self, name: &'a str) -> Option<DirectoryRecord>;

    /// List all entries of the object kind.
    async fn get_all(&self) -> Vec<DirectoryRecord>;

    /// Bind as the entry and return it on success.
    async fn authenticate<'a>(&self, dn: &'a str, password: &'a str) -> Option<DirectoryRecord>;
}

/// Directory client for a single object kind.
#[derive(Clone)]
pub struct DirectoryClient {
    url: String,
    bind_dn: String,
    password: SecretString,
    object: DirectoryObjectSection,
    connector: Arc<dyn DirectoryConnector>,
}

impl DirectoryClient {
    pub fn new(ldap: &LdapSection, object: DirectoryObjectSection) -> Self {
        Self::with_connector(ldap, object, Arc::new(Ldap3Connector::default()))
    }

    pub fn with_connector(
        ldap: &LdapSection,
        object: DirectoryObjectSection,
        connector: Arc<dyn DirectoryConnector>,
    ) -> Self {
        Self {
            url: ldap.url.clone(),
            bind_dn: ldap.user.clone(),
            password: ldap.password.clone(),
            object,
            connector,
        }
    }

    /// Filter matching the object class, optionally combined with `extra`.
    fn object_filter(&self, extra: Option<&str>) -> String {
        let class = format!("(objectClass={})", self.object.objectclass);
        match extra {
            Some(extra) => format!("(&{extra}{class})"),
            None => class,
        }
    }

    /// Bound connection or `None` when the bind fails.
    async fn connect(
        &self,
        bind_dn: &str,
        password: &SecretString,
    ) -> Option<Box<dyn DirectoryConnection>> {
        match self.connector.connect(&self.url, bind_dn, password).await {
            Ok(conn) => Some(conn),
            Err(err @ DirectoryError::Unavailable { .. }) => {
                debug!("unable to connect to {}, server is down: {err}", self.url);
                None
            }
            Err(err) => {
                debug!("unable to connect to {} with {bind_dn}: {err}", self.url);
                None
            }
        }
    }

    /// Search and decode, then release the connection.
    async fn search(
        &self,
        mut conn: Box<dyn DirectoryConnection>,
        base: &str,
        scope: SearchScope,
        filter: &str,
    ) -> Vec<DirectoryRecord> {
        let res = match conn.search(base, scope, filter).await {
            Ok(entries) => entries
                .into_iter()
                .map(|entry| DirectoryRecord::from_entry(entry, &self.object))
                .collect(),
            Err(err) if err.is_empty_result() => {
                debug!("directory search under {base} returned nothing: {err}");
                Vec::new()
            }
            Err(err) => {
                warn!("directory search under {base} failed: {err}");
                Vec::new()
            }
        };
        if let Err(err) = conn.unbind().await {
            debug!("error while unbinding from {}: {err}", self.url);
        }
        res
    }

    async fn get_objects(&self, filter: Option<&str>) -> Vec<DirectoryRecord> {
        match self.connect(&self.bind_dn, &self.password).await {
            Some(conn) => {
                self.search(
                    conn,
                    &self.object.tree_dn,
                    SearchScope::Subtree,
                    &self.object_filter(filter),
                )
                .await
            }
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl DirectoryApi for DirectoryClient {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_by_dn<'a>(&self, dn: &'a str) -> Option<DirectoryRecord> {
        let conn = self.connect(&self.bind_dn, &self.password).await?;
        self.search(conn, dn, SearchScope::Base, "(objectClass=*)")
            .await
            .into_iter()
            .next()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_by_name<'a>(&self, name: &'a str) -> Option<DirectoryRecord> {
        let filter = format!("({}={})", self.object.id_attribute, ldap3::ldap_escape(name));
        self.get_objects(Some(&filter)).await.into_iter().next()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_all(&self) -> Vec<DirectoryRecord> {
        self.get_objects(None).await
    }

    #[tracing::instrument(level = "debug", skip(self, password))]
    async fn authenticate<'a>(&self, dn: &'a str, password: &'a str) -> Option<DirectoryRecord> {
        // An empty password would result in the anonymous bind.
        if password.is_empty() || valid_dn(dn).is_none() {
            return None;
        }
        let password = SecretString::from(password);
        let conn = self.connect(dn, &password).await?;
        self.search(conn, dn, SearchScope::Base, "(objectClass=*)")
            .await
            .into_iter()
            .next()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};
    use tracing_test::traced_test;

    use super::connection::{MockDirectoryConnection, MockDirectoryConnector};
    use super::*;

    fn ldap_config() -> LdapSection {
        LdapSection {
            url: "ldap://ldap.example.com".into(),
            user: "cn=admin,dc=example,dc=com".into(),
            password: SecretString::from("adm1n"),
            ..Default::default()
        }
    }

    fn users() -> DirectoryObjectSection {
        DirectoryObjectSection {
            tree_dn: "ou=Users,dc=example,dc=com".into(),
            id_attribute: "uid".into(),
            objectclass: "inetOrgPerson".into(),
            attribute_mapping: BTreeMap::from([("name".into(), "cn".into())]),
        }
    }

    fn jdoe() -> RawEntry {
        RawEntry {
            dn: "uid=jdoe,ou=Users,dc=example,dc=com".into(),
            attributes: HashMap::from([
                ("uid".into(), vec!["jdoe".into()]),
                ("cn".into(), vec!["John Doe".into()]),
            ]),
        }
    }

    fn connection_returning(
        base: &'static str,
        scope: SearchScope,
        filter: String,
        res: Result<Vec<RawEntry>, DirectoryError>,
    ) -> Box<dyn DirectoryConnection> {
        let mut conn = MockDirectoryConnection::new();
        let mut res = Some(res);
        conn.expect_search()
            .withf(move |b, s, f| b == base && *s == scope && f == filter)
            .times(1)
            .returning(move |_, _, _| res.take().unwrap_or(Ok(Vec::new())));
        conn.expect_unbind().times(1).returning(|| Ok(()));
        Box::new(conn)
    }

    #[tokio::test]
    async fn test_get_by_name_escapes() {
        let name = "jdoe*)(uid=*";
        let filter = format!(
            "(&(uid={})(objectClass=inetOrgPerson))",
            ldap3::ldap_escape(name)
        );
        assert!(!filter.contains("*)(uid=*"));
        let mut connector = MockDirectoryConnector::new();
        connector
            .expect_connect()
            .withf(|url, dn, _| {
                url == "ldap://ldap.example.com" && dn == "cn=admin,dc=example,dc=com"
            })
            .times(1)
            .returning(move |_, _, _| {
                Ok(connection_returning(
                    "ou=Users,dc=example,dc=com",
                    SearchScope::Subtree,
                    filter.clone(),
                    Ok(vec![]),
                ))
            });
        let client = DirectoryClient::with_connector(&ldap_config(), users(), Arc::new(connector));
        assert!(client.get_by_name(name).await.is_none());
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let mut connector = MockDirectoryConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            Ok(connection_returning(
                "ou=Users,dc=example,dc=com",
                SearchScope::Subtree,
                "(&(uid=jdoe)(objectClass=inetOrgPerson))".into(),
                Ok(vec![jdoe()]),
            ))
        });
        let client = DirectoryClient::with_connector(&ldap_config(), users(), Arc::new(connector));
        let record = client.get_by_name("jdoe").await.unwrap();
        assert_eq!(record.dn, "uid=jdoe,ou=Users,dc=example,dc=com");
        assert_eq!(record.get_string("name"), Some("John Doe".into()));
    }

    #[tokio::test]
    async fn test_get_all() {
        let mut connector = MockDirectoryConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            Ok(connection_returning(
                "ou=Users,dc=example,dc=com",
                SearchScope::Subtree,
                "(objectClass=inetOrgPerson)".into(),
                Ok(vec![jdoe(), jdoe()]),
            ))
        });
        let client = DirectoryClient::with_connector(&ldap_config(), users(), Arc::new(connector));
        assert_eq!(client.get_all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_get_by_dn() {
        let mut connector = MockDirectoryConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            Ok(connection_returning(
                "uid=jdoe,ou=Users,dc=example,dc=com",
                SearchScope::Base,
                "(objectClass=*)".into(),
                Ok(vec![jdoe()]),
            ))
        });
        let client = DirectoryClient::with_connector(&ldap_config(), users(), Arc::new(connector));
        assert!(
            client
                .get_by_dn("uid=jdoe,ou=Users,dc=example,dc=com")
                .await
                .is_some()
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_server_down() {
        let mut connector = MockDirectoryConnector::new();
        connector.expect_connect().times(3).returning(|url, _, _| {
            Err(DirectoryError::Unavailable {
                url: url.to_string(),
                message: "connection refused".into(),
            })
        });
        let client = DirectoryClient::with_connector(&ldap_config(), users(), Arc::new(connector));
        assert!(client.get_by_name("jdoe").await.is_none());
        assert!(client.get_all().await.is_empty());
        assert!(
            client
                .get_by_dn("uid=jdoe,ou=Users,dc=example,dc=com")
                .await
                .is_none()
        );
        assert!(logs_contain("server is down"));
    }

    #[tokio::test]
    async fn test_no_such_object() {
        let mut connector = MockDirectoryConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            Ok(connection_returning(
                "uid=ghost,ou=Users,dc=example,dc=com",
                SearchScope::Base,
                "(objectClass=*)".into(),
                Err(DirectoryError::NoSuchObject(
                    "uid=ghost,ou=Users,dc=example,dc=com".into(),
                )),
            ))
        });
        let client = DirectoryClient::with_connector(&ldap_config(), users(), Arc::new(connector));
        assert!(
            client
                .get_by_dn("uid=ghost,ou=Users,dc=example,dc=com")
                .await
                .is_none()
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_authenticate() {
        let mut connector = MockDirectoryConnector::new();
        connector
            .expect_connect()
            .withf(|_, dn, password| {
                use secrecy::ExposeSecret;
                dn == "uid=jdoe,ou=Users,dc=example,dc=com" && password.expose_secret() == "s3cr3t"
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(connection_returning(
                    "uid=jdoe,ou=Users,dc=example,dc=com",
                    SearchScope::Base,
                    "(objectClass=*)".into(),
                    Ok(vec![jdoe()]),
                ))
            });
        let client = DirectoryClient::with_connector(&ldap_config(), users(), Arc::new(connector));
        let record = client
            .authenticate("uid=jdoe,ou=Users,dc=example,dc=com", "s3cr3t")
            .await
            .unwrap();
        assert_eq!(record.name, Some("jdoe".into()));
        assert!(!logs_contain("s3cr3t"));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut connector = MockDirectoryConnector::new();
        connector
            .expect_connect()
            .times(1)
            .returning(|_, dn, _| Err(DirectoryError::InvalidCredentials(dn.to_string())));
        let client = DirectoryClient::with_connector(&ldap_config(), users(), Arc::new(connector));
        assert!(
            client
                .authenticate("uid=jdoe,ou=Users,dc=example,dc=com", "wrong")
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_authenticate_not_a_dn() {
        // The connector has no expectations: any call fails the test.
        let connector = MockDirectoryConnector::new();
        let client = DirectoryClient::with_connector(&ldap_config(), users(), Arc::new(connector));
        assert!(client.authenticate("jdoe", "s3cr3t").await.is_none());
        assert!(
            client
                .authenticate("uid=jdoe,ou=Users,dc=example,dc=com", "")
                .await
                .is_none()
        );
    }
}
