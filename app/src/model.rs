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

//! High-level data types.
//!
//! Request data arrives as plain shapes (JSON bodies or raw query parameters) and is turned into
//! these types by separate validation passes that report every invalid field at once.

use demoapi_core::model::{
    FieldLocation, ModelError, ModelResult, ValidationErrors, check_length, check_range,
};
use demoapi_core::rest::QueryParams;
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::ops::Bound;
use std::str::FromStr;
use uuid::Uuid;

/// Largest number of demo items that the list API accepts to skip.
const MAX_SKIP: i64 = 5;

/// Default number of demo items returned by the list API.
const DEFAULT_LIST_LIMIT: i64 = 10;

/// Default number of items requested through `FilterParams`.
const DEFAULT_FILTER_LIMIT: i64 = 10;

/// Largest number of items that can be requested through `FilterParams`.
const MAX_FILTER_LIMIT: i64 = 100;

/// Minimum length of the free-form search string.
const MIN_QUERY_LENGTH: usize = 3;

/// Maximum length of the free-form search string.
const MAX_QUERY_LENGTH: usize = 50;

/// Rounds `value` to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Response that only carries a human-readable message.
#[derive(Constructor, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Message {
    /// The message.
    message: String,
}

/// An entry in the static list of demo items.
#[derive(Clone, Constructor, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct DemoItem {
    /// Name of the item.
    item_name: String,
}

impl DemoItem {
    /// Returns the static list of demo items, in the order in which they are served.
    pub(crate) fn demo_list() -> Vec<DemoItem> {
        ["Foo", "Bar", "Baz"].into_iter().map(|name| DemoItem::new(name.to_owned())).collect()
    }
}

/// Cookies that the cookie inspection API reports back.
#[derive(Constructor, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Cookies {
    /// Value of the `ads_id` cookie, or null if not set.
    ads_id: Option<String>,
}

/// Paging parameters of the demo items list.
#[derive(Debug, Getters, PartialEq)]
pub(crate) struct ItemsQuery {
    /// Number of items to skip from the beginning of the list.
    skip: usize,

    /// Maximum number of items to return.  Negative values count back from the end of the list.
    limit: i64,
}

impl ItemsQuery {
    /// Validates the raw `query` parameters of a list request.
    pub(crate) fn from_query(query: &QueryParams) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let skip = errors.check(query.parse_value::<i64>("skip").and_then(|skip| {
            check_range(FieldLocation::Query, "skip", skip.unwrap_or(0), 0..=MAX_SKIP)
        }));
        let limit = errors.check(query.parse_value::<i64>("limit")).unwrap_or(DEFAULT_LIST_LIMIT);
        errors.into_result()?;

        let skip = usize::try_from(skip).expect("Range validated above");
        Ok(Self { skip, limit })
    }
}

/// Sort orders supported by `FilterParams`.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OrderBy {
    /// Order by creation time.
    #[default]
    CreatedAt,

    /// Order by last modification time.
    UpdatedAt,
}

impl FromStr for OrderBy {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "created_at" => Ok(OrderBy::CreatedAt),
            "updated_at" => Ok(OrderBy::UpdatedAt),
            _ => Err(ModelError("Input should be 'created_at' or 'updated_at'".to_owned())),
        }
    }
}

/// Filtering options for item searches.
#[derive(Constructor, Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct FilterParams {
    /// Maximum number of items to return, within `(0, 100]`.
    limit: i64,

    /// Number of items to skip.
    offset: i64,

    /// Field to sort the items by.
    order_by: OrderBy,

    /// Tags that the items must carry.
    tags: Vec<String>,
}

impl FilterParams {
    /// Validates the raw `query` parameters of a filter request.
    ///
    /// Tags come from repeated `tags` keys.  Unknown keys are ignored.
    pub(crate) fn from_query(query: &QueryParams) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let limit = errors.check(query.parse_value::<i64>("limit").and_then(|limit| {
            check_range(
                FieldLocation::Query,
                "limit",
                limit.unwrap_or(DEFAULT_FILTER_LIMIT),
                (Bound::Excluded(0), Bound::Included(MAX_FILTER_LIMIT)),
            )
        }));
        let offset = errors.check(query.parse_value::<i64>("offset").and_then(|offset| {
            check_range(FieldLocation::Query, "offset", offset.unwrap_or(0), 0..)
        }));
        let order_by = errors.check(query.parse_value::<OrderBy>("order_by")).unwrap_or_default();
        let tags = query.get_all("tags");
        errors.into_result()?;

        Ok(Self { limit, offset, order_by, tags })
    }
}

/// Boolean query parameter that accepts the usual spellings of true and false.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Flag(bool);

impl FromStr for Flag {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" | "on" => Ok(Flag(true)),
            "false" | "f" | "0" | "no" | "n" | "off" => Ok(Flag(false)),
            _ => Err(ModelError("Input should be a valid boolean".to_owned())),
        }
    }
}

/// Options of a request for a single item.
#[derive(Debug, Getters, PartialEq)]
pub(crate) struct ItemQuery {
    /// Free-form search string to echo back.
    q: Option<String>,

    /// Whether to include the long description of the item.
    full: bool,
}

impl ItemQuery {
    /// Validates the raw `query` parameters of a request for a single item.
    pub(crate) fn from_query(query: &QueryParams) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let q = errors.check(match query.get("q") {
            Some(q) => check_length(
                FieldLocation::Query,
                "q",
                q.to_owned(),
                MIN_QUERY_LENGTH,
                MAX_QUERY_LENGTH,
            )
            .map(Some),
            None => Ok(None),
        });
        let full = errors.check(query.parse_value::<Flag>("full")).unwrap_or_default();
        errors.into_result()?;

        Ok(Self { q, full: full.0 })
    }
}

/// Item as submitted by clients.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct NewItem {
    /// Name of the item.
    name: String,

    /// Identifier of the item, if the client chose one.
    id: Option<Uuid>,

    /// Description of the item.
    description: Option<String>,

    /// Price of the item, tax excluded.
    price: f64,

    /// Taxation rate to apply to the price.
    tax: Option<f64>,
}

/// Item as returned to clients.
#[derive(Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Item {
    /// Name of the item.
    name: String,

    /// Identifier of the item.
    id: Uuid,

    /// Description of the item.
    description: Option<String>,

    /// Price of the item, tax excluded.
    price: f64,

    /// Taxation rate to apply to the price.
    tax: Option<f64>,

    /// Price of the item with the tax applied, rounded to cents.  Only present if there is a tax,
    /// even if that tax is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    price_with_tax: Option<f64>,
}

impl From<NewItem> for Item {
    fn from(new: NewItem) -> Self {
        let price_with_tax = new.tax.map(|tax| round2(new.price * (1.0 + tax)));
        Self {
            name: new.name,
            id: new.id.unwrap_or_else(Uuid::new_v4),
            description: new.description,
            price: new.price,
            tax: new.tax,
            price_with_tax,
        }
    }
}

impl Item {
    /// Returns sample payloads to show in the documentation of the APIs that accept items.
    pub(crate) fn examples() -> Vec<serde_json::Value> {
        vec![
            serde_json::json!({
                "name": "My other cool item",
                "description":
                    "Another worthwhile item that you'll want in your Easter basket 🐰 this year!",
                "price": 3.50,
                "tax": 0.09,
                "price_with_tax": 3.82,
            }),
            serde_json::json!({
                "name": "My cool item",
                "description":
                    "Worthwhile item that you'll want to have under your Christmas tree 🎄 this year!",
                "price": 99.95,
                "tax": 0.05,
                "price_with_tax": 104.95,
            }),
        ]
    }
}

/// Summary of a single item.
#[derive(Constructor, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct ItemDetails {
    /// Identifier of the item as given in the request path.
    item_id: String,

    /// Search string given in the request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,

    /// Long description of the item, only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Result of updating an item: the submitted item merged with the request parameters.
#[derive(Constructor, Serialize)]
pub(crate) struct UpdatedItem {
    /// Identifier of the item as given in the request path.
    item_id: String,

    /// The submitted item.
    #[serde(flatten)]
    item: Item,

    /// Search string given in the request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
}

/// Names of the machine learning models known to the service.
///
/// The serialized form of each model is its value, not its name.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) enum ModelName {
    /// The "foo" model.
    #[serde(rename = "foo_gw")]
    Foo,

    /// The "bar" model.
    #[serde(rename = "barbasol")]
    Bar,

    /// The "baz" model.
    #[serde(rename = "bazBall")]
    Baz,

    /// The "dickie" model.
    #[serde(rename = "dickiePants")]
    Dickie,
}

impl ModelName {
    /// All known models.
    const ALL: [ModelName; 4] = [ModelName::Foo, ModelName::Bar, ModelName::Baz, ModelName::Dickie];

    /// Returns the short name of the model.
    pub(crate) fn name(self) -> &'static str {
        match self {
            ModelName::Foo => "foo",
            ModelName::Bar => "bar",
            ModelName::Baz => "baz",
            ModelName::Dickie => "dickie",
        }
    }

    /// Returns the value of the model, which is how clients refer to it.
    pub(crate) fn value(self) -> &'static str {
        match self {
            ModelName::Foo => "foo_gw",
            ModelName::Bar => "barbasol",
            ModelName::Baz => "bazBall",
            ModelName::Dickie => "dickiePants",
        }
    }
}

impl FromStr for ModelName {
    type Err = ModelError;

    /// Parses a model from its value.  Values are case-sensitive.
    fn from_str(s: &str) -> ModelResult<Self> {
        ModelName::ALL.into_iter().find(|model| model.value() == s).ok_or_else(|| {
            ModelError(
                "Input should be 'foo_gw', 'barbasol', 'bazBall' or 'dickiePants'".to_owned(),
            )
        })
    }
}

/// Description of a machine learning model.
#[derive(Constructor, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct ModelDescription {
    /// The described model.
    model_name: ModelName,

    /// Commentary about the model.
    message: String,
}

/// An entry in the static list of known users.
#[derive(Clone, Constructor, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct UserName {
    /// Name the user goes by.
    username: String,
}

impl UserName {
    /// Returns the static list of known users, in the order in which they are served.
    pub(crate) fn demo_list() -> Vec<UserName> {
        ["Rick", "Morty"].into_iter().map(|name| UserName::new(name.to_owned())).collect()
    }
}

/// A user of the service.
#[derive(Constructor, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct User {
    /// Identifier of the user.
    user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{Token, assert_de_tokens_error, assert_tokens};

    /// Shorthand to build query parameters from a literal query string.
    fn query(raw: &str) -> QueryParams {
        QueryParams::parse(raw)
    }

    /// Extracts the names of the fields that failed validation.
    fn invalid_fields(errors: ValidationErrors) -> Vec<String> {
        errors.errors().iter().map(|e| e.field.clone()).collect()
    }

    #[test]
    fn test_demo_list() {
        let names = DemoItem::demo_list().into_iter().map(|i| i.item_name).collect::<Vec<_>>();
        assert_eq!(vec!["Foo", "Bar", "Baz"], names);
    }

    #[test]
    fn test_items_query_defaults() {
        assert_eq!(ItemsQuery { skip: 0, limit: 10 }, ItemsQuery::from_query(&query("")).unwrap());
    }

    #[test]
    fn test_items_query_ok() {
        assert_eq!(
            ItemsQuery { skip: 5, limit: -3 },
            ItemsQuery::from_query(&query("skip=5&limit=-3&other=x")).unwrap()
        );
    }

    #[test]
    fn test_items_query_errors() {
        let errors = ItemsQuery::from_query(&query("skip=6&limit=many")).unwrap_err();
        assert_eq!(vec!["skip", "limit"], invalid_fields(errors));

        let errors = ItemsQuery::from_query(&query("skip=-1")).unwrap_err();
        assert_eq!(
            "Invalid query parameter 'skip': Input should be greater than or equal to 0",
            errors.to_string()
        );
    }

    #[test]
    fn test_filter_params_defaults() {
        assert_eq!(
            FilterParams::new(10, 0, OrderBy::CreatedAt, vec![]),
            FilterParams::from_query(&query("")).unwrap()
        );
    }

    #[test]
    fn test_filter_params_ok() {
        assert_eq!(
            FilterParams::new(100, 7, OrderBy::UpdatedAt, vec!["foo".to_owned(), "bar".to_owned()]),
            FilterParams::from_query(&query(
                "tags=foo&limit=100&offset=7&order_by=updated_at&tags=bar&unknown=1"
            ))
            .unwrap()
        );
    }

    #[test]
    fn test_filter_params_errors() {
        let errors =
            FilterParams::from_query(&query("limit=0&offset=-1&order_by=name")).unwrap_err();
        assert_eq!(vec!["limit", "offset", "order_by"], invalid_fields(errors));

        let errors = FilterParams::from_query(&query("limit=101")).unwrap_err();
        assert_eq!(
            "Invalid query parameter 'limit': Input should be less than or equal to 100",
            errors.to_string()
        );

        let errors = FilterParams::from_query(&query("limit=0")).unwrap_err();
        assert_eq!(
            "Invalid query parameter 'limit': Input should be greater than 0",
            errors.to_string()
        );
    }

    #[test]
    fn test_order_by_ser_de() {
        assert_tokens(&OrderBy::CreatedAt, &[Token::UnitVariant {
            name: "OrderBy",
            variant: "created_at",
        }]);
        assert_tokens(&OrderBy::UpdatedAt, &[Token::UnitVariant {
            name: "OrderBy",
            variant: "updated_at",
        }]);
    }

    #[test]
    fn test_flag() {
        for raw in ["true", "True", "t", "T", "1", "yes", "y", "Y", "ON"] {
            assert_eq!(Flag(true), Flag::from_str(raw).unwrap());
        }
        for raw in ["false", "FALSE", "f", "F", "0", "no", "n", "N", "off"] {
            assert_eq!(Flag(false), Flag::from_str(raw).unwrap());
        }
        for raw in ["", "2", "maybe", "truee", "ye", "of"] {
            assert_eq!(
                ModelError("Input should be a valid boolean".to_owned()),
                Flag::from_str(raw).unwrap_err()
            );
        }
    }

    #[test]
    fn test_item_query() {
        assert_eq!(
            ItemQuery { q: None, full: false },
            ItemQuery::from_query(&query("")).unwrap()
        );
        assert_eq!(
            ItemQuery { q: Some("abc".to_owned()), full: true },
            ItemQuery::from_query(&query("q=abc&full=yes")).unwrap()
        );

        let errors = ItemQuery::from_query(&query("q=ab&full=maybe")).unwrap_err();
        assert_eq!(vec!["q", "full"], invalid_fields(errors));

        let errors = ItemQuery::from_query(&query(&format!("q={}", "x".repeat(51)))).unwrap_err();
        assert_eq!(
            "Invalid query parameter 'q': String should have at most 50 characters",
            errors.to_string()
        );
    }

    #[test]
    fn test_item_from_new_item_with_tax() {
        let id = Uuid::new_v4();
        let new: NewItem = serde_json::from_value(serde_json::json!({
            "name": "Thing",
            "id": id,
            "price": 10,
            "tax": 0.1,
        }))
        .unwrap();
        let item = Item::from(new);
        assert_eq!(&id, item.id());
        assert_eq!(&Some(11.0), item.price_with_tax());
    }

    #[test]
    fn test_item_from_new_item_without_tax() {
        let new: NewItem =
            serde_json::from_value(serde_json::json!({"name": "Thing", "price": 10.5})).unwrap();
        let item = Item::from(new);
        assert_eq!(&None, item.price_with_tax());
        assert_eq!(Some(uuid::Version::Random), item.id().get_version());

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("price_with_tax").is_none());
        assert_eq!(Some(&serde_json::Value::Null), json.get("description"));
        assert_eq!(Some(&serde_json::Value::Null), json.get("tax"));
    }

    #[test]
    fn test_item_from_new_item_with_zero_tax() {
        let new: NewItem = serde_json::from_value(serde_json::json!({
            "name": "Thing",
            "price": 10.5,
            "tax": 0,
        }))
        .unwrap();
        let item = Item::from(new);
        assert_eq!(&Some(10.5), item.price_with_tax());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(Some(&serde_json::json!(10.5)), json.get("price_with_tax"));
    }

    #[test]
    fn test_item_rounds_price_with_tax() {
        let new: NewItem = serde_json::from_value(serde_json::json!({
            "name": "Tree",
            "price": 99.95,
            "tax": 0.05,
        }))
        .unwrap();
        assert_eq!(&Some(104.95), Item::from(new).price_with_tax());
    }

    #[test]
    fn test_item_ids_are_fresh() {
        let new = || -> NewItem {
            serde_json::from_value(serde_json::json!({"name": "Thing", "price": 1})).unwrap()
        };
        assert_ne!(Item::from(new()).id(), Item::from(new()).id());
    }

    #[test]
    fn test_updated_item_is_flat() {
        let id = Uuid::new_v4();
        let new: NewItem = serde_json::from_value(serde_json::json!({
            "name": "Thing",
            "id": id,
            "price": 2.0,
        }))
        .unwrap();
        let updated = UpdatedItem::new("abc".to_owned(), Item::from(new), Some("query".to_owned()));
        assert_eq!(
            serde_json::json!({
                "item_id": "abc",
                "name": "Thing",
                "id": id,
                "description": null,
                "price": 2.0,
                "tax": null,
                "q": "query",
            }),
            serde_json::to_value(&updated).unwrap()
        );
    }

    #[test]
    fn test_model_name_ser_de_ok() {
        for (model, value) in [
            (ModelName::Foo, "foo_gw"),
            (ModelName::Bar, "barbasol"),
            (ModelName::Baz, "bazBall"),
            (ModelName::Dickie, "dickiePants"),
        ] {
            assert_tokens(&model, &[Token::UnitVariant { name: "ModelName", variant: value }]);
            assert_eq!(model, ModelName::from_str(value).unwrap());
            assert_eq!(value, model.value());
        }
    }

    #[test]
    fn test_model_name_de_error() {
        assert_de_tokens_error::<ModelName>(
            &[Token::UnitVariant { name: "ModelName", variant: "foo" }],
            "unknown variant `foo`, expected one of `foo_gw`, `barbasol`, `bazBall`, `dickiePants`",
        );
    }

    #[test]
    fn test_model_name_from_str_is_case_sensitive() {
        for raw in ["foo", "FOO_GW", "BazBall", ""] {
            assert_eq!(
                "Input should be 'foo_gw', 'barbasol', 'bazBall' or 'dickiePants'",
                ModelName::from_str(raw).unwrap_err().to_string()
            );
        }
    }

    #[test]
    fn test_model_name_names() {
        let names = ModelName::ALL.into_iter().map(ModelName::name).collect::<Vec<_>>();
        assert_eq!(vec!["foo", "bar", "baz", "dickie"], names);
    }
}
