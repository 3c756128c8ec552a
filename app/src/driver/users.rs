// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Operations on users.

use crate::driver::Driver;
use crate::model::{User, UserName};
use demoapi_core::driver::{DriverError, DriverResult};

/// Identifier of the user that issues all requests.
const CURRENT_USER_ID: &str = "current_foo";

impl Driver {
    /// Returns all known users.
    pub(crate) fn list_users(self) -> Vec<UserName> {
        self.users.to_vec()
    }

    /// Gets the user that issued the request.
    pub(crate) fn get_current_user(self) -> User {
        User::new(CURRENT_USER_ID.to_owned())
    }

    /// Gets the user identified by `user_id`.
    pub(crate) fn get_user(self, user_id: String) -> DriverResult<User> {
        if user_id != CURRENT_USER_ID {
            return Err(DriverError::NotFound(format!("User '{}' not found!", user_id)));
        }
        Ok(User::new(user_id))
    }
}
