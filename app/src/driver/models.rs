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

//! Operations on machine learning models.

use crate::driver::Driver;
use crate::model::{ModelDescription, ModelName};

impl Driver {
    /// Describes the `model_name` model.
    pub(crate) fn describe_model(self, model_name: ModelName) -> ModelDescription {
        let message = match model_name {
            ModelName::Foo => "Deep Learning FooTW!".to_owned(),
            ModelName::Bar => "LeCNN all the bars!".to_owned(),
            _ => format!("Default enum name: {}", model_name.name()),
        };
        ModelDescription::new(model_name, message)
    }
}
