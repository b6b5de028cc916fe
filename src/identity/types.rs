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

pub mod metadata;
pub mod provider_api;
pub mod role;
pub mod tenant;
pub mod user;

pub use metadata::Metadata;
pub use provider_api::IdentityApi;
pub use role::{Role, RoleBuilder, RoleCreate, RoleCreateBuilder, RoleUpdate, RoleUpdateBuilder};
pub use tenant::{
    Tenant, TenantBuilder, TenantCreate, TenantCreateBuilder, TenantUpdate, TenantUpdateBuilder,
};
pub use user::{
    UserCreate, UserCreateBuilder, UserResponse, UserResponseBuilder, UserUpdate,
    UserUpdateBuilder,
};
