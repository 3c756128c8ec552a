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

//! Operations for administrators.

use crate::driver::Driver;
use crate::model::Message;
use demoapi_core::driver::{DriverError, DriverResult};
use log::warn;

impl Driver {
    /// Checks that `token` grants access to the admin operations.
    pub(crate) fn verify_admin_token(self, token: &str) -> DriverResult<()> {
        if token != &*self.admin_token {
            warn!("Rejected admin request with an invalid token");
            return Err(DriverError::InvalidInput("X-Token header invalid".to_owned()));
        }
        Ok(())
    }

    /// Performs the admin operation.
    pub(crate) fn run_admin(self) -> Message {
        Message::new("Admin getting schwifty".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;

    #[test]
    fn test_verify_admin_token_ok() {
        test_driver().verify_admin_token(TEST_ADMIN_TOKEN).unwrap();
    }

    #[test]
    fn test_verify_admin_token_invalid() {
        for token in ["", "the-test", "THE-TEST-TOKEN", "the-test-token "] {
            assert_eq!(
                DriverError::InvalidInput("X-Token header invalid".to_owned()),
                test_driver().verify_admin_token(token).unwrap_err()
            );
        }
    }

    #[test]
    fn test_run_admin() {
        assert_eq!(Message::new("Admin getting schwifty".to_owned()), test_driver().run_admin());
    }
}
