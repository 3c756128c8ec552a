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

//! API to get a user.

use crate::driver::Driver;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use demoapi_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(user_id): Path<String>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let user = driver.get_user(user_id)?;

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use demoapi_core::rest::testutils::*;

    fn route(user_id: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/users/{}", user_id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup();

        let response = OneShotBuilder::new(context.app(), route("current_foo"))
            .send_empty()
            .await
            .expect_json::<User>()
            .await;
        assert_eq!(User::new("current_foo".to_owned()), response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup();

        OneShotBuilder::new(context.app(), route("anything-else"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^User 'anything-else' not found!$")
            .await;
    }

    #[tokio::test]
    async fn test_user_id_is_case_sensitive() {
        let context = TestContext::setup();

        OneShotBuilder::new(context.app(), (http::Method::GET, "/USERS/Current_Foo"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 'Current_Foo' not found")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().into_app(), route("current_foo"));
}
