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

//! The `RouteEntry` and `RouteTable` types.

use crate::routes::{PathPattern, RouteDoc, RouteError, RouteResult};
use http::Method;
use std::collections::HashMap;

/// Descriptor of a registered route.
///
/// The handler of the route is the one bound in the router under the same method and template,
/// which is why deriving new entries never touches either of them.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteEntry {
    /// The HTTP method the route responds to.
    method: Method,

    /// The matcher for the route's path template.
    pattern: PathPattern,

    /// Documentation metadata for the route.
    pub(super) doc: RouteDoc,
}

impl RouteEntry {
    /// Creates a new case-sensitive entry for `method` and `template`.
    pub(super) fn new(method: Method, template: &str, doc: RouteDoc) -> RouteResult<Self> {
        Ok(Self { method, pattern: PathPattern::parse(template)?, doc })
    }

    /// Returns the HTTP method of the route.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path template of the route as it was declared.
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// Returns the matcher of the route.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Returns the documentation metadata of the route.
    pub fn doc(&self) -> &RouteDoc {
        &self.doc
    }

    /// Creates a copy of this entry mounted under `prefix`.
    ///
    /// The resulting entry is case-sensitive regardless of this one, as mounting happens during
    /// registration.
    pub(super) fn prefixed(&self, prefix: &str) -> RouteResult<Self> {
        let template = if self.template() == "/" {
            prefix.to_owned()
        } else {
            format!("{}{}", prefix, self.template())
        };
        RouteEntry::new(self.method.clone(), &template, self.doc.clone())
    }
}

/// Ordered collection of route descriptors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteTable {
    /// The entries in registration order.
    pub(super) entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Returns the entries in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `entry`, rejecting it if the same method and template are already present.
    pub(super) fn push(&mut self, entry: RouteEntry) -> RouteResult<()> {
        let duplicate = self
            .entries
            .iter()
            .any(|e| e.method == entry.method && e.template() == entry.template());
        if duplicate {
            let template = entry.template().to_owned();
            return Err(RouteError::Duplicate { method: entry.method, template });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Derives a new table in which every matcher ignores letter case.
    ///
    /// The derived table has the same entries in the same order, with the same methods, templates
    /// and parameters.  Deriving from an already case-insensitive table yields an equal table.
    /// Fails if any matcher cannot be recompiled or if two distinct templates become
    /// indistinguishable.
    pub fn case_insensitive(&self) -> RouteResult<RouteTable> {
        let mut folded: HashMap<String, &str> = HashMap::new();
        let mut entries = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let template = entry.template();
            match folded.get(&template.to_lowercase()) {
                Some(first) if *first != template => {
                    return Err(RouteError::Ambiguous {
                        first: (*first).to_owned(),
                        second: template.to_owned(),
                    });
                }
                Some(_) => (),
                None => {
                    folded.insert(template.to_lowercase(), template);
                }
            }

            entries.push(RouteEntry {
                method: entry.method.clone(),
                pattern: entry.pattern.to_case_insensitive()?,
                doc: entry.doc.clone(),
            });
        }
        Ok(RouteTable { entries })
    }

    /// Finds the most specific entry matching `path` among those accepted by `filter`.
    ///
    /// Static segments win over parameters and parameters win over wildcards, which is the same
    /// priority the router applies.  Ties are broken by registration order.
    fn best_match<F>(&self, path: &str, filter: F) -> Option<&RouteEntry>
    where
        F: Fn(&RouteEntry) -> bool,
    {
        self.entries
            .iter()
            .filter(|e| filter(e) && e.pattern.is_match(path))
            .min_by_key(|e| e.pattern.specificity())
    }

    /// Finds the entry that serves `method` on `path`.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&RouteEntry> {
        self.best_match(path, |e| e.method == *method)
    }

    /// Rewrites `path` so that its literal segments are spelled as in the template of the route
    /// that matches it, regardless of method.  Returns `None` if no route matches.
    pub fn canonicalize(&self, path: &str) -> Option<String> {
        self.best_match(path, |_| true).and_then(|e| e.pattern.canonical_path(path))
    }
}
