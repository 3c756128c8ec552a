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

//! API to get the user issuing the request.

use crate::driver::Driver;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use demoapi_core::rest::EmptyBody;

/// API handler.
pub(crate) async fn handler(State(driver): State<Driver>, _: EmptyBody) -> impl IntoResponse {
    Json(driver.get_current_user())
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use demoapi_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/users/me".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup();

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<User>()
            .await;
        assert_eq!(User::new("current_foo".to_owned()), response);
    }

    #[tokio::test]
    async fn test_any_case_wins_over_user_id() {
        let context = TestContext::setup();

        for path in ["/USERS/ME", "/Users/Me", "/users/mE"] {
            let response = OneShotBuilder::new(context.app(), (http::Method::GET, path))
                .send_empty()
                .await
                .expect_json::<User>()
                .await;
            assert_eq!(User::new("current_foo".to_owned()), response);
        }
    }

    test_payload_must_be_empty!(TestContext::setup().into_app(), route());
}
