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

//! API to describe a machine learning model.

use crate::driver::Driver;
use crate::model::ModelName;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use demoapi_core::model::{FieldError, FieldLocation};
use demoapi_core::rest::{EmptyBody, RestError};
use std::str::FromStr;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(model_name): Path<String>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let model_name = ModelName::from_str(&model_name)
        .map_err(|e| FieldError::new(FieldLocation::Path, "model_name", e.to_string()))?;

    Ok(Json(driver.describe_model(model_name)))
}
