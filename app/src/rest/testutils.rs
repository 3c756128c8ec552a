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

//! Test utilities for the REST API.

use crate::driver::testutils::test_driver;
use crate::rest::app;
use axum::Router;

pub(crate) use crate::driver::testutils::TEST_ADMIN_TOKEN;

/// State of a REST test: the app under test, configured with a test driver.
pub(crate) struct TestContext {
    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Sets up the app with the driver returned by `test_driver`.
    pub(crate) fn setup() -> Self {
        let app = app(test_driver()).unwrap();
        Self { app }
    }

    /// Returns a router to send a single request to the app.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns its router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }
}
