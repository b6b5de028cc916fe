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
//! Identity provider with the `sql` driver against the database.
use eyre::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing_test::traced_test;

use keystone_ldap_sql::auth::AuthenticationError;
use keystone_ldap_sql::identity::{IdentityApi, IdentityProviderError, types::*};
use keystone_ldap_sql::keystone::ServiceState;

use crate::common::{get_config, get_state, get_state_with};

/// Tenant `t1` with the member `u1` holding role `r1`, and tenant `t2`.
async fn setup_data(state: &ServiceState) -> Result<()> {
    let identity = state.provider.get_identity_provider();
    for (id, name) in [("t1", "demo"), ("t2", "other")] {
        identity
            .create_tenant(
                state,
                TenantCreateBuilder::default()
                    .id(id)
                    .name(name)
                    .build()?,
            )
            .await?;
    }
    identity
        .create_user(
            state,
            UserCreateBuilder::default()
                .id("u1")
                .name("jdoe")
                .password("secret")
                .build()?,
        )
        .await?;
    identity
        .create_role(
            state,
            RoleCreateBuilder::default().id("r1").name("member").build()?,
        )
        .await?;
    identity.add_user_to_tenant(state, "t1", "u1").await?;
    identity
        .add_role_to_user_and_tenant(state, "u1", "t1", "r1")
        .await?;
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_authenticate() -> Result<()> {
    let state = get_state().await?;
    setup_data(&state).await?;

    let authn = state
        .provider
        .get_identity_provider()
        .authenticate(&state, "u1", Some("t1"), "secret")
        .await?;
    assert_eq!(authn.user_id, "u1");
    assert_eq!(authn.user.map(|x| x.name), Some("jdoe".into()));
    assert_eq!(authn.tenant.map(|x| x.id), Some("t1".into()));
    assert_eq!(authn.metadata.roles, vec!["r1"]);

    let authn = state
        .provider
        .get_identity_provider()
        .authenticate(&state, "u1", None, "secret")
        .await?;
    assert!(authn.tenant.is_none());
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_authenticate_failures() -> Result<()> {
    let state = get_state().await?;
    setup_data(&state).await?;
    let identity = state.provider.get_identity_provider();

    for (user_id, password) in [("u1", "wrong"), ("missing", "secret")] {
        assert!(matches!(
            identity.authenticate(&state, user_id, None, password).await,
            Err(IdentityProviderError::AuthenticationInfo {
                source: AuthenticationError::UserNameOrPasswordWrong
            })
        ));
    }
    assert!(matches!(
        identity.authenticate(&state, "u1", Some("t2"), "secret").await,
        Err(IdentityProviderError::AuthenticationInfo {
            source: AuthenticationError::InvalidTenant(..)
        })
    ));
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_delete_user_cascade() -> Result<()> {
    let state = get_state().await?;
    setup_data(&state).await?;
    let identity = state.provider.get_identity_provider();

    assert_eq!(identity.get_tenant_users(&state, "t1").await?.len(), 1);
    identity.delete_user(&state, "u1").await?;
    assert!(identity.get_tenant_users(&state, "t1").await?.is_empty());
    assert!(matches!(
        identity.get_metadata(&state, "u1", "t1").await,
        Err(IdentityProviderError::MetadataNotFound { .. })
    ));
    assert!(matches!(
        identity.delete_user(&state, "u1").await,
        Err(IdentityProviderError::UserNotFound(..))
    ));
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_delete_role_revokes_grants() -> Result<()> {
    let state = get_state().await?;
    setup_data(&state).await?;
    let identity = state.provider.get_identity_provider();

    identity.delete_role(&state, "r1").await?;
    assert!(
        identity
            .get_roles_for_user_and_tenant(&state, "u1", "t1")
            .await?
            .is_empty()
    );
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_memberships() -> Result<()> {
    let state = get_state().await?;
    setup_data(&state).await?;
    let identity = state.provider.get_identity_provider();

    identity.add_user_to_tenant(&state, "t1", "u1").await?;
    identity.add_user_to_tenant(&state, "t2", "u1").await?;
    let mut tenants = identity.get_tenants_for_user(&state, "u1").await?;
    tenants.sort();
    assert_eq!(tenants, vec!["t1", "t2"]);

    identity.remove_user_from_tenant(&state, "t2", "u1").await?;
    assert!(matches!(
        identity.remove_user_from_tenant(&state, "t2", "u1").await,
        Err(IdentityProviderError::MembershipNotFound { .. })
    ));
    assert_eq!(identity.get_tenants_for_user(&state, "u1").await?, vec!["t1"]);
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_check_remote_user_autocreate() -> Result<()> {
    let mut cfg = get_config();
    cfg.ldapauthz.autocreate_users = true;
    let state = get_state_with(cfg).await?;
    setup_data(&state).await?;
    let identity = state.provider.get_identity_provider();
    let dn = "cn=Jane Roe,ou=Users,dc=example,dc=com";

    let (user, tenant) = identity.check_remote_user(&state, dn, "demo").await?;
    assert_eq!(user.name, dn);
    assert_eq!(tenant.id, "t1");
    assert_eq!(identity.get_tenants_for_user(&state, &user.id).await?, vec!["t1"]);

    let (again, _) = identity.check_remote_user(&state, dn, "demo").await?;
    assert_eq!(again.id, user.id);
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_check_remote_user_unknown() -> Result<()> {
    let state = get_state().await?;
    setup_data(&state).await?;

    assert!(matches!(
        state
            .provider
            .get_identity_provider()
            .check_remote_user(&state, "cn=Jane Roe,dc=example,dc=com", "demo")
            .await,
        Err(IdentityProviderError::AuthenticationInfo {
            source: AuthenticationError::Unauthorized(..)
        })
    ));
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_authorize_remote_user_with_policy() -> Result<()> {
    let mut policy = NamedTempFile::new()?;
    write!(policy, r#"{{"*": {{"tenant": "other"}}}}"#)?;
    let mut cfg = get_config();
    cfg.ldapauthz.ldap_policy = Some(policy.path().to_path_buf());
    cfg.ldapauthz.autocreate_users = true;
    let state = get_state_with(cfg).await?;
    setup_data(&state).await?;
    let identity = state.provider.get_identity_provider();
    let dn = "cn=Jane Roe,ou=Users,dc=example,dc=com";

    let (user, tenant) = identity.authorize_remote_user(&state, dn).await?;
    assert_eq!(user.name, dn);
    assert_eq!(tenant.id, "t2");
    assert_eq!(identity.get_tenants_for_user(&state, &user.id).await?, vec!["t2"]);
    Ok(())
}

#[tokio::test]
async fn test_malformed_policy_rejected() -> Result<()> {
    let mut policy = NamedTempFile::new()?;
    write!(policy, "tenant = other")?;
    let mut cfg = get_config();
    cfg.ldapauthz.ldap_policy = Some(policy.path().to_path_buf());
    assert!(get_state_with(cfg).await.is_err());
    Ok(())
}
