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

//! Front service that applies the case-insensitive route table to incoming requests.

use crate::routes::RouteTable;
use axum::Router;
use axum::extract::{Request, State};
use axum::response::Response;
use http::Uri;
use http::uri::PathAndQuery;
use log::{debug, warn};
use std::sync::Arc;
use tower::util::ServiceExt;

/// State of the front service.
#[derive(Clone)]
struct Front {
    /// The case-insensitive route table, read-only once startup completes.
    table: Arc<RouteTable>,

    /// The router with the real handlers, which only knows about the canonical paths.
    inner: Router,
}

/// Puts `table` in front of `inner` and returns the resulting router.
pub(super) fn front(table: RouteTable, inner: Router) -> Router {
    let front = Front { table: Arc::new(table), inner };
    Router::new().fallback(dispatch).with_state(front)
}

/// Replaces the path in `uri` with `path`, keeping everything else.
fn with_path(uri: &Uri, path: &str) -> Result<Uri, http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_owned(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}

/// Handles every request by rewriting its path to the canonical case of the matching route, if
/// any, and then forwarding it to the inner router.
///
/// Requests that match no route are forwarded untouched so that the router reports them.
async fn dispatch(State(front): State<Front>, mut request: Request) -> Response {
    let path = request.uri().path();
    if let Some(canonical) = front.table.canonicalize(path) {
        if canonical != path {
            match with_path(request.uri(), &canonical) {
                Ok(uri) => {
                    debug!("Routing {} as {}", path, canonical);
                    *request.uri_mut() = uri;
                }
                Err(e) => warn!("Cannot route {} as {}: {}", path, canonical, e),
            }
        }
    }

    match front.inner.oneshot(request).await {
        Ok(response) => response,
        Err(e) => match e {},
    }
}
