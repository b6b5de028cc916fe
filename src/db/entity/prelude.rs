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
pub use super::ec2_credential::Entity as Ec2Credential;
pub use super::endpoint::Entity as Endpoint;
pub use super::metadata::Entity as Metadata;
pub use super::role::Entity as Role;
pub use super::service::Entity as Service;
pub use super::tenant::Entity as Tenant;
pub use super::user::Entity as User;
pub use super::user_tenant_membership::Entity as UserTenantMembership;
