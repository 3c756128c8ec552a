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

//! Guard for the admin APIs.

use crate::driver::Driver;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use demoapi_core::model::{FieldError, FieldLocation};
use demoapi_core::rest::{RestError, get_unique_header};

/// Name of the header that carries the admin token.
const TOKEN_HEADER: &str = "x-token";

/// Middleware that only lets `request` through if it carries the admin token.
pub(crate) async fn verify(
    State(driver): State<Driver>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, RestError> {
    let token = match get_unique_header(&headers, TOKEN_HEADER)? {
        Some(value) => value
            .to_str()
            .map_err(|_| RestError::InvalidRequest("X-Token header invalid".to_owned()))?,
        None => return Err(FieldError::missing(FieldLocation::Header, TOKEN_HEADER).into()),
    };
    driver.verify_admin_token(token)?;

    Ok(next.run(request).await)
}
