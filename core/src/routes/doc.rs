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

//! Generated documentation of the registered routes.

use crate::routes::RouteTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Documentation metadata attached to a route at registration time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteDoc {
    /// Tags grouping the route with related ones.
    pub(super) tags: Vec<String>,

    /// Descriptions of notable response codes.
    pub(super) responses: BTreeMap<u16, String>,

    /// Example payloads accepted by the route.
    pub(super) examples: Vec<serde_json::Value>,

    /// Whether the route is left out of the documentation.
    pub(super) hidden: bool,
}

impl RouteDoc {
    /// Creates the metadata for a route that is not documented.
    pub(super) fn hidden() -> Self {
        Self { hidden: true, ..Default::default() }
    }

    /// Returns the tags of the route.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the documented responses of the route keyed by status code.
    pub fn responses(&self) -> &BTreeMap<u16, String> {
        &self.responses
    }

    /// Returns true if the route is left out of the documentation.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Documentation of a single method on a path.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Operation {
    /// Tags grouping the operation with related ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Names of the path parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,

    /// Descriptions of notable responses keyed by status code.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, String>,

    /// Example payloads.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<serde_json::Value>,
}

/// Documentation of all the routes of a service, keyed by path and lowercase method.
///
/// Paths are the templates as they were declared, so they reflect neither the case of the
/// requests nor the case-insensitive matchers.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ApiDoc {
    /// Operations keyed by documented path and then by method.
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
}

impl ApiDoc {
    /// Generates the documentation for all non-hidden routes in `table`.
    pub fn new(table: &RouteTable) -> Self {
        let mut paths: BTreeMap<String, BTreeMap<String, Operation>> = BTreeMap::new();
        for entry in table.entries() {
            if entry.doc.hidden {
                continue;
            }

            let operation = Operation {
                tags: entry.doc.tags.clone(),
                parameters: entry.pattern().param_names().into_iter().map(str::to_owned).collect(),
                responses: entry
                    .doc
                    .responses
                    .iter()
                    .map(|(code, description)| (code.to_string(), description.clone()))
                    .collect(),
                examples: entry.doc.examples.clone(),
            };
            paths
                .entry(entry.pattern().documented_path())
                .or_default()
                .insert(entry.method().as_str().to_lowercase(), operation);
        }
        Self { paths }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::RouteEntry;
    use http::Method;

    #[test]
    fn test_api_doc_new() {
        let mut table = RouteTable::default();
        table.push(RouteEntry::new(Method::GET, "/", RouteDoc::default()).unwrap()).unwrap();
        table
            .push(
                RouteEntry::new(
                    Method::POST,
                    "/admin",
                    RouteDoc {
                        tags: vec!["admin".to_owned()],
                        responses: BTreeMap::from([(418, "I'm a teapot".to_owned())]),
                        ..Default::default()
                    },
                )
                .unwrap(),
            )
            .unwrap();
        table
            .push(RouteEntry::new(Method::GET, "/models/:model_name", RouteDoc::default()).unwrap())
            .unwrap();
        table
            .push(RouteEntry::new(Method::GET, "/openapi.json", RouteDoc::hidden()).unwrap())
            .unwrap();

        let doc = ApiDoc::new(&table);
        assert_eq!(
            serde_json::json!({
                "paths": {
                    "/": {"get": {}},
                    "/admin": {
                        "post": {"tags": ["admin"], "responses": {"418": "I'm a teapot"}},
                    },
                    "/models/{model_name}": {"get": {"parameters": ["model_name"]}},
                }
            }),
            serde_json::to_value(&doc).unwrap()
        );
    }
}
