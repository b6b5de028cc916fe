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

//! # Directory transport
//!
//! Bound directory sessions. The [`Ldap3Connector`] talks LDAP using the
//! `ldap3` crate; tests replace it with the mocks.
use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, SearchEntry};
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::directory::error::DirectoryError;
use crate::directory::types::{RawEntry, SearchScope};

/// Bound session with the directory server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryConnection: Send {
    /// Search the directory.
    async fn search<'a>(
        &mut self,
        base: &'a str,
        scope: SearchScope,
        filter: &'a str,
    ) -> Result<Vec<RawEntry>, DirectoryError>;

    /// Terminate the session.
    async fn unbind(&mut self) -> Result<(), DirectoryError>;
}

/// Factory of the bound sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryConnector: Send + Sync {
    /// Open a new connection and bind it with the given credentials.
    async fn connect<'a>(
        &self,
        url: &'a str,
        bind_dn: &'a str,
        password: &'a SecretString,
    ) -> Result<Box<dyn DirectoryConnection>, DirectoryError>;
}

/// LDAP connector.
#[derive(Clone, Debug, Default)]
pub struct Ldap3Connector {}

struct Ldap3Connection {
    url: String,
    ldap: Ldap,
}

#[async_trait]
impl DirectoryConnector for Ldap3Connector {
    async fn connect<'a>(
        &self,
        url: &'a str,
        bind_dn: &'a str,
        password: &'a SecretString,
    ) -> Result<Box<dyn DirectoryConnection>, DirectoryError> {
        let (conn, mut ldap) = LdapConnAsync::new(url)
            .await
            .map_err(|e| DirectoryError::from_ldap(e, url, bind_dn))?;
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!("directory connection terminated with error: {e}");
            }
        });
        ldap.simple_bind(bind_dn, password.expose_secret())
            .await
            .and_then(|res| res.success())
            .map_err(|e| DirectoryError::from_ldap(e, url, bind_dn))?;
        Ok(Box::new(Ldap3Connection {
            url: url.to_string(),
            ldap,
        }))
    }
}

#[async_trait]
impl DirectoryConnection for Ldap3Connection {
    async fn search<'a>(
        &mut self,
        base: &'a str,
        scope: SearchScope,
        filter: &'a str,
    ) -> Result<Vec<RawEntry>, DirectoryError> {
        let (entries, _) = self
            .ldap
            .search(base, scope.into(), filter, vec!["*"])
            .await
            .and_then(|res| res.success())
            .map_err(|e| DirectoryError::from_ldap(e, &self.url, base))?;
        Ok(entries
            .into_iter()
            .map(SearchEntry::construct)
            .map(|entry| RawEntry {
                dn: entry.dn,
                attributes: entry.attrs,
            })
            .collect())
    }

    async fn unbind(&mut self) -> Result<(), DirectoryError> {
        self.ldap
            .unbind()
            .await
            .map_err(|e| DirectoryError::from_ldap(e, &self.url, ""))
    }
}
