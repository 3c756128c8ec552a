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

//! The `Registry` type.

use crate::routes::{ApiDoc, RouteDoc, RouteEntry, RouteError, RouteResult, RouteTable, dispatch};
use axum::extract::Request;
use axum::handler::Handler;
use axum::response::IntoResponse;
use axum::routing::{MethodRouter, Route};
use axum::{Json, Router};
use http::{Method, StatusCode};
use log::{debug, info};
use std::convert::Infallible;
use tower::{Layer, Service};

/// Builder for the routes of a service.
///
/// Every registration binds the handler into an `axum::Router` and records the matching
/// `RouteEntry`.  Registrations fail early on malformed templates and duplicates so that a
/// service never starts with a partial set of routes.
#[must_use]
pub struct Registry<S = ()> {
    /// Descriptors of the routes registered so far.
    table: RouteTable,

    /// Router holding the handlers of the routes registered so far.
    router: Router<S>,

    /// Documentation metadata applied to routes registered from now on.
    defaults: RouteDoc,
}

impl<S> Default for Registry<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Registry<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { table: RouteTable::default(), router: Router::new(), defaults: RouteDoc::default() }
    }

    /// Returns the descriptors of the routes registered so far.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Binds `method_router`, which must only handle `method`, to `template`.
    fn add(
        mut self,
        method: Method,
        template: &str,
        method_router: MethodRouter<S>,
    ) -> RouteResult<Self> {
        let entry = RouteEntry::new(method, template, self.defaults.clone())?;
        self.table.push(entry)?;
        self.router = self.router.route(template, method_router);
        Ok(self)
    }

    /// Registers `handler` for `GET` requests on `template`.
    pub fn get<H, T>(self, template: &str, handler: H) -> RouteResult<Self>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::GET, template, axum::routing::get(handler))
    }

    /// Registers `handler` for `POST` requests on `template`.
    pub fn post<H, T>(self, template: &str, handler: H) -> RouteResult<Self>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::POST, template, axum::routing::post(handler))
    }

    /// Registers `handler` for `PUT` requests on `template`.
    pub fn put<H, T>(self, template: &str, handler: H) -> RouteResult<Self>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::PUT, template, axum::routing::put(handler))
    }

    /// Tags all routes in this registry, including the ones registered later.
    pub fn tag(mut self, tag: &str) -> Self {
        self.defaults.tags.push(tag.to_owned());
        for entry in &mut self.table.entries {
            entry.doc.tags.push(tag.to_owned());
        }
        self
    }

    /// Documents a notable `status` for all routes in this registry, including the ones
    /// registered later.
    pub fn response(mut self, status: StatusCode, description: &str) -> Self {
        self.defaults.responses.insert(status.as_u16(), description.to_owned());
        for entry in &mut self.table.entries {
            entry.doc.responses.insert(status.as_u16(), description.to_owned());
        }
        self
    }

    /// Attaches example payloads to the most recently registered route.
    pub fn examples<I>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        if let Some(entry) = self.table.entries.last_mut() {
            entry.doc.examples.extend(examples);
        }
        self
    }

    /// Applies `layer` to the handlers of all routes registered so far.
    ///
    /// This is the way to gate a group of routes behind a check before mounting it with `nest`.
    pub fn route_layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.router = self.router.route_layer(layer);
        self
    }

    /// Mounts all routes of `group` under `prefix`.
    ///
    /// The entries of `group` are merged into this registry with their templates prefixed, so
    /// they are subject to the same case-insensitive matching as any other route.
    pub fn nest(mut self, prefix: &str, group: Registry<S>) -> RouteResult<Self> {
        if !prefix.starts_with('/') || prefix.ends_with('/') || prefix.contains([':', '*']) {
            return Err(RouteError::InvalidPrefix(prefix.to_owned()));
        }

        for entry in group.table.entries() {
            self.table.push(entry.prefixed(prefix)?)?;
        }
        self.router = self.router.nest(prefix, group.router);
        Ok(self)
    }

    /// Adds all routes of `group` to this registry as they are.
    ///
    /// Unlike `nest`, templates are not prefixed, which allows grouping routes that share
    /// documentation metadata without changing their paths.
    pub fn merge(mut self, group: Registry<S>) -> RouteResult<Self> {
        for entry in group.table.entries {
            self.table.push(entry)?;
        }
        self.router = self.router.merge(group.router);
        Ok(self)
    }

    /// Serves the documentation of all routes registered so far as JSON on `template`.
    ///
    /// This should be the last registration so that the documentation is complete.  The route
    /// itself is left out of the documentation.
    pub fn document(mut self, template: &str) -> RouteResult<Self> {
        let doc = ApiDoc::new(&self.table);
        self.table.push(RouteEntry::new(Method::GET, template, RouteDoc::hidden())?)?;
        self.router = self.router.route(
            template,
            axum::routing::get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        );
        Ok(self)
    }

    /// Finishes startup by deriving the case-insensitive route table and putting it in front of
    /// the router, which receives its `state`.
    ///
    /// Any error returned here must abort startup.
    pub fn into_app(self, state: S) -> RouteResult<Router> {
        let table = self.table.case_insensitive()?;
        info!("Serving {} routes with case-insensitive path matching", table.len());
        for entry in table.entries() {
            debug!("Route: {} {}", entry.method(), entry.template());
        }
        Ok(dispatch::front(table, self.router.with_state(state)))
    }
}
