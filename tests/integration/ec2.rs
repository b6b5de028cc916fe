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
//! EC2 credentials with the `sql` driver against the database.
use eyre::Result;
use tracing_test::traced_test;

use keystone_ldap_sql::ec2::{Ec2Api, Ec2ProviderError, types::*};

use crate::common::get_state;

#[tokio::test]
#[traced_test]
async fn test_credentials() -> Result<()> {
    let state = get_state().await?;
    let ec2 = state.provider.get_ec2_provider();

    let generated = ec2
        .create_credential(
            &state,
            Ec2CredentialCreateBuilder::default()
                .user_id("u1")
                .tenant_id("t1")
                .build()?,
        )
        .await?;
    assert!(!generated.access.is_empty());
    assert!(generated.secret.is_some());
    ec2.create_credential(
        &state,
        Ec2CredentialCreateBuilder::default()
            .access("AKIA2")
            .secret("s2")
            .user_id("u1")
            .build()?,
    )
    .await?;
    ec2.create_credential(
        &state,
        Ec2CredentialCreateBuilder::default()
            .access("AKIA3")
            .user_id("u2")
            .build()?,
    )
    .await?;

    let mut own: Vec<String> = ec2
        .list_credentials(&state, "u1")
        .await?
        .into_iter()
        .map(|x| x.access)
        .collect();
    own.sort();
    let mut expected = vec![generated.access.clone(), "AKIA2".to_string()];
    expected.sort();
    assert_eq!(own, expected);

    assert_eq!(ec2.get_credential(&state, "AKIA2").await?.secret.as_deref(), Some("s2"));
    assert!(matches!(
        ec2.create_credential(
            &state,
            Ec2CredentialCreateBuilder::default()
                .access("AKIA2")
                .user_id("u3")
                .build()?,
        )
        .await,
        Err(Ec2ProviderError::Conflict(..))
    ));

    ec2.delete_credential(&state, "AKIA2").await?;
    assert!(matches!(
        ec2.get_credential(&state, "AKIA2").await,
        Err(Ec2ProviderError::CredentialNotFound(..))
    ));
    assert!(matches!(
        ec2.delete_credential(&state, "AKIA2").await,
        Err(Ec2ProviderError::CredentialNotFound(..))
    ));
    Ok(())
}
