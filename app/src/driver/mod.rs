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

//! Business logic for the service.

use crate::model::{DemoItem, UserName};
use std::sync::Arc;

mod admin;
mod items;
mod models;
mod users;

/// Business logic.
///
/// The service keeps no mutable state: every operation works on the read-only data captured
/// when the driver is created.  Operations consume the driver because handlers get a clone of
/// it for each request.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The static list of items served by the list API.
    items: Arc<[DemoItem]>,

    /// The static list of users served by the users API.
    users: Arc<[UserName]>,

    /// Value that requests to the admin APIs must present.
    admin_token: Arc<str>,
}

impl Driver {
    /// Creates a new driver that serves the demo items and users and that grants admin access
    /// to clients presenting `admin_token`.
    pub(crate) fn new(admin_token: String) -> Self {
        Self {
            items: Arc::from(DemoItem::demo_list()),
            users: Arc::from(UserName::demo_list()),
            admin_token: Arc::from(admin_token),
        }
    }
}

#[cfg(test)]
pub(crate) mod testutils {
    use super::*;

    /// Admin token used by tests.
    pub(crate) const TEST_ADMIN_TOKEN: &str = "the-test-token";

    /// Creates a driver suitable for testing.
    pub(crate) fn test_driver() -> Driver {
        Driver::new(TEST_ADMIN_TOKEN.to_owned())
    }
}
