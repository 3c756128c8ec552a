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

//! Route registration with case-insensitive path matching.
//!
//! Services declare their APIs on a `Registry` instead of directly on an `axum::Router`.  The
//! registry binds every handler into a regular router and, in parallel, records a `RouteEntry`
//! describing the route: its method, its path template and a regex that matches the template.
//!
//! Startup then happens in two phases:
//!
//! 1.  All routes are registered, yielding an immutable `RouteTable` of case-sensitive entries.
//!
//! 1.  `Registry::into_app` derives a new table via `RouteTable::case_insensitive`, in which every
//!     matcher has been recompiled to ignore letter case, and puts it in front of the router.  For
//!     each request, the front resolves the path against the derived table and, on a match,
//!     rewrites the path to the canonical case of the template before handing it to the router.
//!
//! Any problem building or deriving the table is returned as a `RouteError`, which services must
//! treat as fatal: serving requests with a partial table is never correct.

use http::Method;

mod dispatch;
mod doc;
mod pattern;
mod registry;
mod table;

pub use doc::{ApiDoc, Operation, RouteDoc};
pub use pattern::PathPattern;
pub use registry::Registry;
pub use table::{RouteEntry, RouteTable};

/// Startup errors raised while building or deriving the route table.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Indicates that two distinct templates only differ in case.
    #[error("Routes '{first}' and '{second}' cannot be told apart when ignoring case")]
    Ambiguous {
        /// The template registered first.
        first: String,

        /// The template registered later.
        second: String,
    },

    /// Indicates that the same method and template were registered twice.
    #[error("Route {method} {template} is registered more than once")]
    Duplicate {
        /// The method of the route.
        method: Method,

        /// The template of the route.
        template: String,
    },

    /// Indicates that a matcher could not be compiled.
    #[error("Cannot compile matcher for route '{template}': {error}")]
    InvalidPattern {
        /// The template whose matcher failed to compile.
        template: String,

        /// The underlying compilation error.
        #[source]
        error: regex::Error,
    },

    /// Indicates that a prefix to mount a group of routes on is malformed.
    #[error("Invalid prefix '{0}': must start but not end with a slash and have no parameters")]
    InvalidPrefix(String),

    /// Indicates that a path template is malformed.
    #[error("Invalid route template '{template}': {reason}")]
    InvalidTemplate {
        /// The malformed template.
        template: String,

        /// Description of the problem.
        reason: String,
    },
}

/// Result type for this module.
pub type RouteResult<T> = Result<T, RouteError>;
