//! Route pattern compilation and validation.
//!
//! # Responsibilities
//! - Translate file-system route paths into router patterns
//! - Reject syntax the router cannot express (optional params, inner wildcards)
//! - Detect duplicate patterns before they silently overwrite each other
//!
//! # File Route Translation
//! ```text
//! /(marketing)//blog/:slug  → /blog/:slug
//! /docs/*path               → /docs/**:path
//! /caf é                    → /caf%20%C3%A9
//! /it's!                    → /it's!
//! /posts/:id?               → OptionalParam error
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::routing::node::NodeKind;
use crate::routing::path::normalize_trailing_slash;
use crate::routing::router::{Router, RouterOptions};

/// Errors raised while compiling or validating route patterns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("route pattern must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("optional parameters are not supported: {0}")]
    OptionalParam(String),

    #[error("placeholder without a name in {0}")]
    EmptyParamName(String),

    #[error("wildcard must be the last segment: {0}")]
    WildcardNotLast(String),

    #[error("duplicate route \"{pattern}\" found at \"{first}\" and \"{second}\"")]
    Duplicate {
        pattern: String,
        first: String,
        second: String,
    },
}

/// Compile a file-system route path into a router pattern.
pub fn compile_file_route(path: &str) -> Result<String, PatternError> {
    let collapsed = collapse_slashes(&strip_groups(path));

    let pattern = collapsed
        .split('/')
        .map(|segment| {
            let segment = match segment.find('*') {
                Some(star) => format!("{}**:{}", &segment[..star], &segment[star + 1..]),
                None => segment.to_string(),
            };
            if segment.starts_with(':') || segment.starts_with('*') {
                segment
            } else {
                encode_component(&segment)
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    if pattern.split('/').any(is_optional_param) {
        return Err(PatternError::OptionalParam(pattern));
    }
    Ok(pattern)
}

/// Check a router pattern for syntax the router cannot honor.
pub fn validate_pattern(pattern: &str) -> Result<(), PatternError> {
    if !pattern.starts_with('/') {
        return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
    }

    let segments: Vec<&str> = pattern.split('/').collect();
    let last_meaningful = segments.iter().rposition(|s| !s.is_empty());

    for (i, segment) in segments.iter().enumerate() {
        if is_optional_param(segment) {
            return Err(PatternError::OptionalParam(pattern.to_string()));
        }
        match NodeKind::of_segment(segment) {
            NodeKind::Placeholder if *segment == ":" => {
                return Err(PatternError::EmptyParamName(pattern.to_string()));
            }
            NodeKind::Wildcard if Some(i) != last_meaningful => {
                return Err(PatternError::WildcardNotLast(pattern.to_string()));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Marks that `encodeURIComponent` leaves alone but `urlencoding` escapes.
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%2A", "*"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
];

fn encode_component(segment: &str) -> String {
    let mut encoded = urlencoding::encode(segment).into_owned();
    for (escape, mark) in UNRESERVED_MARKS {
        if encoded.contains(escape) {
            encoded = encoded.replace(escape, mark);
        }
    }
    encoded
}

fn is_optional_param(segment: &str) -> bool {
    segment
        .find(':')
        .is_some_and(|colon| segment[colon..].contains('?'))
}

/// Drop `(group)` markers; they organize files without affecting URLs.
fn strip_groups(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('(') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        match tail.find(|c: char| c == ')' || c == '/') {
            Some(close) if close > 0 && tail[close..].starts_with(')') => {
                rest = &tail[close + 1..];
            }
            _ => {
                out.push('(');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

/// An ordered set of compiled routes with duplicate detection.
#[derive(Debug)]
pub struct RouteSet<T> {
    entries: Vec<(String, T)>,
    sources: HashMap<String, String>,
    options: RouterOptions,
}

impl<T> Default for RouteSet<T> {
    fn default() -> Self {
        Self::new(RouterOptions::default())
    }
}

impl<T> RouteSet<T> {
    pub fn new(options: RouterOptions) -> Self {
        Self {
            entries: Vec::new(),
            sources: HashMap::new(),
            options,
        }
    }

    /// Add a route given as a file-system path.
    pub fn add_file_route(&mut self, source: &str, data: T) -> Result<&str, PatternError> {
        let pattern = compile_file_route(source)?;
        self.push(pattern, source, data)
    }

    /// Add a route given directly in router pattern syntax.
    pub fn add_pattern(&mut self, pattern: &str, data: T) -> Result<&str, PatternError> {
        validate_pattern(pattern)?;
        self.push(pattern.to_string(), pattern, data)
    }

    fn push(&mut self, pattern: String, source: &str, data: T) -> Result<&str, PatternError> {
        let key = normalize_trailing_slash(&pattern, self.options.strict_trailing_slash).to_string();
        if let Some(first) = self.sources.get(&key) {
            return Err(PatternError::Duplicate {
                pattern: key,
                first: first.clone(),
                second: source.to_string(),
            });
        }
        self.sources.insert(key, source.to_string());
        self.entries.push((pattern, data));
        Ok(&self.entries[self.entries.len() - 1].0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compiled patterns in insertion order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn into_router(self) -> Router<T> {
        let mut router = Router::with_options(self.options);
        for (pattern, data) in self.entries {
            router.insert(&pattern, data);
        }
        router
    }
}
