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

//! The `PathPattern` type.

use crate::routes::{RouteError, RouteResult};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// A single `/`-separated piece of a path template.
#[derive(Clone, Debug, PartialEq)]
enum Segment {
    /// Text that must appear verbatim (modulo case once the pattern is case-insensitive).
    Literal(String),

    /// A `:name` parameter matching one non-empty segment.
    Param(String),

    /// A `*name` parameter matching the non-empty remainder of the path.
    Wildcard(String),
}

/// Checks if `name` can be used as a parameter name, which is also a regex group name.
fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => (),
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// The matcher for a path template such as `/items/:item_id`.
///
/// The template syntax is the router's: literal segments, `:name` parameters spanning a whole
/// segment, and an optional trailing `*name` wildcard.  The template is compiled into an anchored
/// regex whose capture groups are named after the parameters.
#[derive(Clone, Debug)]
pub struct PathPattern {
    /// The template this pattern was compiled from.
    template: String,

    /// The parsed template.
    segments: Vec<Segment>,

    /// The regex source the matcher was compiled from.
    source: String,

    /// Whether the matcher ignores letter case.
    case_insensitive: bool,

    /// The compiled matcher.
    regex: Regex,
}

impl PathPattern {
    /// Compiles a case-sensitive pattern from a path `template`.
    pub fn parse<T: Into<String>>(template: T) -> RouteResult<Self> {
        let template = template.into();
        let invalid = |reason: &str| RouteError::InvalidTemplate {
            template: template.clone(),
            reason: reason.to_owned(),
        };

        let Some(rest) = template.strip_prefix('/') else {
            return Err(invalid("must start with a slash"));
        };

        let mut segments = vec![];
        let mut names = HashSet::new();
        if !rest.is_empty() {
            let raw_segments = rest.split('/').collect::<Vec<_>>();
            for (i, raw) in raw_segments.iter().enumerate() {
                let segment = if let Some(name) = raw.strip_prefix(':') {
                    Segment::Param(name.to_owned())
                } else if let Some(name) = raw.strip_prefix('*') {
                    if i != raw_segments.len() - 1 {
                        return Err(invalid("wildcards must be the last segment"));
                    }
                    Segment::Wildcard(name.to_owned())
                } else if raw.contains([':', '*']) {
                    return Err(invalid("parameters must span a whole segment"));
                } else {
                    Segment::Literal((*raw).to_owned())
                };

                if let Segment::Param(name) | Segment::Wildcard(name) = &segment {
                    if !is_valid_param_name(name) {
                        return Err(invalid(&format!("bad parameter name '{}'", name)));
                    }
                    if !names.insert(name.clone()) {
                        return Err(invalid(&format!("duplicate parameter '{}'", name)));
                    }
                }
                segments.push(segment);
            }
        }

        let mut source = "^/".to_owned();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                source.push('/');
            }
            match segment {
                Segment::Literal(text) => source.push_str(&regex::escape(text)),
                Segment::Param(name) => source.push_str(&format!("(?P<{}>[^/]+)", name)),
                Segment::Wildcard(name) => source.push_str(&format!("(?P<{}>.+)", name)),
            }
        }
        source.push('$');

        let regex = compile(&template, &source, false)?;
        Ok(Self { template, segments, source, case_insensitive: false, regex })
    }

    /// Derives an equivalent pattern that ignores letter case.
    ///
    /// The matcher is recompiled from the same source, so captures and parameter extraction are
    /// unchanged.  Deriving from a pattern that already ignores case yields an equal pattern.
    pub fn to_case_insensitive(&self) -> RouteResult<Self> {
        let regex = compile(&self.template, &self.source, true)?;
        Ok(Self {
            template: self.template.clone(),
            segments: self.segments.clone(),
            source: self.source.clone(),
            case_insensitive: true,
            regex,
        })
    }

    /// Returns the template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the source of the regex that implements the matcher.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the matcher ignores letter case.
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Returns the names of the parameters in the template, in order.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Literal(_) => None,
                Segment::Param(name) | Segment::Wildcard(name) => Some(name.as_str()),
            })
            .collect()
    }

    /// Returns true if `path` matches this pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches `path` and returns the raw value of every parameter, in template order.
    pub fn captures(&self, path: &str) -> Option<Vec<(String, String)>> {
        let captures = self.regex.captures(path)?;
        Some(
            self.param_names()
                .into_iter()
                .map(|name| (name.to_owned(), captures[name].to_owned()))
                .collect(),
        )
    }

    /// Matches `path` and rebuilds it with the literal segments spelled as in the template.
    ///
    /// Parameter values are kept as they appear in `path`.
    pub fn canonical_path(&self, path: &str) -> Option<String> {
        let captures = self.regex.captures(path)?;
        let mut canonical = "/".to_owned();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                canonical.push('/');
            }
            match segment {
                Segment::Literal(text) => canonical.push_str(text),
                Segment::Param(name) | Segment::Wildcard(name) => {
                    canonical.push_str(&captures[name.as_str()])
                }
            }
        }
        Some(canonical)
    }

    /// Returns the template using `{name}` placeholders as is customary in API documentation.
    pub fn documented_path(&self) -> String {
        let mut path = "/".to_owned();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                path.push('/');
            }
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(name) | Segment::Wildcard(name) => {
                    path.push('{');
                    path.push_str(name);
                    path.push('}');
                }
            }
        }
        path
    }

    /// Returns a sort key where lower values denote more specific patterns: patterns with fewer
    /// wildcards win, then patterns with fewer parameters.
    pub(super) fn specificity(&self) -> (usize, usize) {
        let mut wildcards = 0;
        let mut params = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(_) => (),
                Segment::Param(_) => params += 1,
                Segment::Wildcard(_) => wildcards += 1,
            }
        }
        (wildcards, params)
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
            && self.source == other.source
            && self.case_insensitive == other.case_insensitive
    }
}

/// Compiles the regex `source` of the route `template`.
fn compile(template: &str, source: &str, case_insensitive: bool) -> RouteResult<Regex> {
    RegexBuilder::new(source).case_insensitive(case_insensitive).build().map_err(|error| {
        RouteError::InvalidPattern { template: template.to_owned(), error }
    })
}
