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

//! # Keystone LDAP/SQL identity backends
//!
//! Keystone keeps users, tenants, roles, EC2 credentials and the service
//! catalog in a relational database. Many deployments however already have a
//! directory (LDAP) holding the user population and would like to let those
//! users authenticate without copying them into Keystone.
//!
//! This crate provides the backend drivers that make both sources of truth
//! look like one:
//!
//! - [`directory`] wraps the directory server into a stateless client that
//!   binds, searches and decodes entries into typed records. Every call opens
//!   its own connection; failures to bind or reach the server are reported as
//!   "no result" so that callers can fall back to the database.
//!
//! - [`identity`] exposes the identity driver contract with a pure `sql`
//!   backend and an `ldap_sql` backend which authenticates and resolves users
//!   from the directory first and falls back to the database. Directory users
//!   are bound to a single configured default tenant and receive a uniform
//!   set of default roles.
//!
//! - [`ec2`] does the same for EC2 style long lived access keys.
//!
//! - [`catalog`] stores services and endpoints and assembles the region and
//!   service type indexed catalog with the endpoint URL templates expanded for
//!   the requesting user and tenant.
//!
//! The REST layer, policy enforcement and token handling live elsewhere and
//! only talk to this crate through the provider APIs.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod directory;
pub mod ec2;
pub mod error;
pub mod identity;
pub mod keystone;
pub mod plugin_manager;
pub mod provider;

#[cfg(test)]
mod tests;
