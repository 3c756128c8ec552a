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

//! API to report the cookies sent by the client.

use crate::model::Cookies;
use axum::Json;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use demoapi_core::rest::{EmptyBody, RestError, get_cookie};

/// API handler.
pub(crate) async fn handler(
    headers: HeaderMap,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let ads_id = get_cookie(&headers, "ads_id")?;

    Ok(Json(Cookies::new(ads_id)))
}
