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

//! Entry point to the REST server.

use crate::driver::Driver;
use crate::model::Item;
use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use demoapi_core::routes::{Registry, RouteResult};

mod admin_post;
mod admin_token;
mod item_get;
mod item_put;
mod items_cookie_get;
mod items_filter_get;
mod items_get;
mod items_post;
mod model_get;
mod root_get;
#[cfg(test)]
mod testutils;
mod user_get;
mod user_me_get;
mod users_get;

/// Creates the router for the application.
///
/// All routes match request paths regardless of letter case.  Fails if the routes cannot be
/// set up, in which case the service must not start.
pub(crate) fn app(driver: Driver) -> RouteResult<Router> {
    let admin = Registry::<Driver>::new()
        .post("/", admin_post::handler)?
        .route_layer(middleware::from_fn_with_state(driver.clone(), admin_token::verify))
        .tag("admin")
        .response(StatusCode::IM_A_TEAPOT, "I'm a teapot");

    let users = Registry::<Driver>::new()
        .get("/users/", users_get::handler)?
        .get("/users/me", user_me_get::handler)?
        .get("/users/:user_id", user_get::handler)?
        .tag("users");

    Registry::<Driver>::new()
        .get("/", root_get::handler)?
        .get("/items", items_get::handler)?
        .post("/items", items_post::handler)?
        .examples(Item::examples())
        .get("/items_filterExample", items_filter_get::handler)?
        .get("/items_CookieExample", items_cookie_get::handler)?
        .get("/items/:item_id", item_get::handler)?
        .put("/items/:item_id", item_put::handler)?
        .examples(Item::examples())
        .merge(users)?
        .get("/models/:model_name", model_get::handler)?
        .nest("/admin", admin)?
        .document("/openapi.json")?
        .into_app(driver)
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use demoapi_core::rest::testutils::*;
    use demoapi_core::routes::ApiDoc;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/openapi.json".to_owned())
    }

    #[tokio::test]
    async fn test_openapi_lists_declared_routes() {
        let context = TestContext::setup();

        let doc = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<ApiDoc>()
            .await;
        let paths = doc.paths.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(
            vec![
                "/",
                "/admin",
                "/items",
                "/items/{item_id}",
                "/items_CookieExample",
                "/items_filterExample",
                "/models/{model_name}",
                "/users/",
                "/users/me",
                "/users/{user_id}",
            ],
            paths
        );

        let methods = doc.paths["/items"].keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(vec!["get", "post"], methods);
        assert_eq!(2, doc.paths["/items"]["post"].examples.len());
        assert!(doc.paths["/items"]["get"].examples.is_empty());
        assert_eq!(2, doc.paths["/items/{item_id}"]["put"].examples.len());
        assert_eq!(vec!["item_id"], doc.paths["/items/{item_id}"]["get"].parameters);
    }

    #[tokio::test]
    async fn test_openapi_documents_admin_group() {
        let context = TestContext::setup();

        let doc = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<ApiDoc>()
            .await;
        let admin = &doc.paths["/admin"]["post"];
        assert_eq!(vec!["admin"], admin.tags);
        assert_eq!(Some(&"I'm a teapot".to_owned()), admin.responses.get("418"));
        assert!(doc.paths["/"]["get"].tags.is_empty());
    }

    #[tokio::test]
    async fn test_openapi_documents_users_group() {
        let context = TestContext::setup();

        let doc = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<ApiDoc>()
            .await;
        for path in ["/users/", "/users/me", "/users/{user_id}"] {
            assert_eq!(vec!["users"], doc.paths[path]["get"].tags, "Bad tags for {}", path);
        }
        assert!(doc.paths["/items"]["get"].tags.is_empty());
    }

    #[tokio::test]
    async fn test_openapi_any_case() {
        let context = TestContext::setup();

        let doc = OneShotBuilder::new(context.app(), (http::Method::GET, "/OpenAPI.JSON"))
            .send_empty()
            .await
            .expect_json::<ApiDoc>()
            .await;
        assert!(doc.paths.contains_key("/users/{user_id}"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let context = TestContext::setup();

        OneShotBuilder::new(context.app(), (http::Method::GET, "/ITEMS/a/b"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .take_body_as_text()
            .await;
    }
}
