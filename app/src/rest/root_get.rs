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

//! API to greet the world.

use crate::model::Message;
use axum::Json;
use axum::response::IntoResponse;
use demoapi_core::rest::EmptyBody;

/// API handler.
pub(crate) async fn handler(_: EmptyBody) -> impl IntoResponse {
    Json(Message::new("Hello World".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use demoapi_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup();

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Message>()
            .await;
        assert_eq!(Message::new("Hello World".to_owned()), response);
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let context = TestContext::setup();

        OneShotBuilder::new(context.app(), (http::Method::DELETE, "/"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::METHOD_NOT_ALLOWED)
            .take_body_as_text()
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().into_app(), route());
}
