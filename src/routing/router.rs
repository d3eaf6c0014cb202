//! Route registration, lookup and removal.
//!
//! # Responsibilities
//! - Build the segment trie lazily as patterns are inserted
//! - Serve literal routes from a direct map, bypassing the trie
//! - Resolve placeholders and wildcards with parameter extraction
//! - Detach emptied leaves on removal
//!
//! # Lookup Priority
//! ```text
//! static map hit        → payload, no params
//! literal child         → descend
//! placeholder children  → one whose max_depth == remaining segments, else first
//! dead end / no payload → last wildcard seen on the way, capturing the rest
//!                         (captures made along the walk are kept)
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RouterConfig;
use crate::observability::metrics;
use crate::routing::node::{wildcard_param_name, Node, NodeId, NodeKind};
use crate::routing::path::{normalize_trailing_slash, segments};

/// Parameters captured by placeholders and wildcards.
pub type Params = HashMap<String, String>;

/// Router construction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Keep trailing slashes significant instead of collapsing them.
    pub strict_trailing_slash: bool,
}

/// Result of a successful lookup.
///
/// `params` is `None` when the route matched without any placeholder or
/// wildcard taking part.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<D> {
    pub data: D,
    pub params: Option<Params>,
}

impl<T: Clone> RouteMatch<&T> {
    /// Detach the match from the router borrow.
    pub fn cloned(self) -> RouteMatch<T> {
        RouteMatch {
            data: self.data.clone(),
            params: self.params,
        }
    }
}

impl<D: Serialize> RouteMatch<D> {
    /// Render the match as JSON: the payload with a `params` field merged in.
    ///
    /// Object payloads get the field added in place. Any other payload is
    /// wrapped as `{"data": ..., "params": ...}`.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        let data = serde_json::to_value(&self.data)?;
        let Some(params) = &self.params else {
            return Ok(data);
        };
        let params = serde_json::to_value(params)?;
        Ok(match data {
            Value::Object(mut map) => {
                map.insert("params".to_string(), params);
                Value::Object(map)
            }
            other => serde_json::json!({ "data": other, "params": params }),
        })
    }
}

/// Radix tree over `/`-delimited path segments.
#[derive(Debug)]
pub struct Router<T> {
    options: RouterOptions,
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    static_routes: HashMap<String, NodeId>,
    route_count: usize,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::with_options(RouterOptions::default())
    }
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RouterOptions) -> Self {
        Self {
            options,
            nodes: vec![Node::new(NodeKind::Normal, None)],
            free: Vec::new(),
            static_routes: HashMap::new(),
            route_count: 0,
        }
    }

    /// Build a router and register the configured routes in file order.
    pub fn from_config(config: RouterConfig<T>) -> Self {
        let mut router = Self::with_options(config.options());
        for entry in config.routes {
            router.insert(&entry.path, entry.data);
        }
        router
    }

    pub fn options(&self) -> RouterOptions {
        self.options
    }

    /// Number of nodes carrying a payload.
    pub fn len(&self) -> usize {
        self.route_count
    }

    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }

    /// Access a node by the handle `insert` returned.
    ///
    /// Handles of nodes pruned by `remove` may be recycled by later inserts.
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Register `data` under `path`, returning the terminal node.
    ///
    /// Re-inserting a path replaces its payload. Anonymous `*` placeholders
    /// are named `_0`, `_1`, ... by their position in `path`, rather than by
    /// how many new `*` nodes this call happens to create.
    pub fn insert(&mut self, path: &str, data: T) -> NodeId {
        let path = normalize_trailing_slash(path, self.options.strict_trailing_slash);
        let sections = segments(path);

        let mut is_static = true;
        let mut anonymous = 0usize;
        let mut node = NodeId::ROOT;
        let mut visited = Vec::with_capacity(sections.len() + 1);
        visited.push(node);

        for section in &sections {
            let kind = NodeKind::of_segment(section);
            if kind.is_dynamic() {
                is_static = false;
            }
            // Anonymous names follow the star's position in the pattern.
            let anonymous_name = (*section == "*").then(|| {
                let name = format!("_{anonymous}");
                anonymous += 1;
                name
            });

            node = match self.nodes[node.0].children.get(*section) {
                Some(&child) => child,
                None => self.attach(node, section, kind, anonymous_name),
            };
            visited.push(node);
        }

        let chain = visited.len();
        for (depth, id) in visited.into_iter().enumerate() {
            let entry = &mut self.nodes[id.0];
            entry.max_depth = entry.max_depth.max(chain - depth);
        }

        if self.nodes[node.0].data.replace(data).is_none() {
            self.route_count += 1;
        }
        if is_static {
            self.static_routes.insert(path.to_string(), node);
        }

        tracing::debug!(path = %path, static_route = is_static, "Route inserted");
        metrics::record_mutation("insert");
        metrics::record_route_count(self.route_count);
        node
    }

    /// Find the payload registered for `path`, extracting parameters.
    pub fn lookup(&self, path: &str) -> Option<RouteMatch<&T>> {
        let path = normalize_trailing_slash(path, self.options.strict_trailing_slash);

        if let Some(data) = self
            .static_routes
            .get(path)
            .and_then(|id| self.nodes[id.0].data.as_ref())
        {
            metrics::record_lookup("static");
            return Some(RouteMatch { data, params: None });
        }

        let sections = segments(path);
        let mut captured: Vec<(String, String)> = Vec::new();
        let mut params_found = false;
        // (wildcard node, first unconsumed segment)
        let mut fallback: Option<(NodeId, usize)> = None;
        let mut current = Some(NodeId::ROOT);

        for (i, section) in sections.iter().enumerate() {
            let Some(id) = current else { break };
            let node = &self.nodes[id.0];

            if let Some(wildcard) = node.wildcard_child {
                fallback = Some((wildcard, i));
            }

            if let Some(&child) = node.children.get(*section) {
                current = Some(child);
                continue;
            }

            current = self.pick_placeholder(node, sections.len() - i);
            if let Some(chosen) = current {
                if let Some(name) = &self.nodes[chosen.0].param_name {
                    captured.push((name.clone(), section.to_string()));
                }
                params_found = true;
            }
        }

        let resolved = current.filter(|id| self.nodes[id.0].data.is_some());
        let (target, outcome) = match (resolved, fallback) {
            (Some(id), _) if params_found => (id, "dynamic"),
            (Some(id), _) => (id, "static"),
            (None, Some((wildcard, start))) => {
                let name = self.nodes[wildcard.0].param_name.as_deref().unwrap_or("_");
                captured.push((name.to_string(), sections[start..].join("/")));
                params_found = true;
                (wildcard, "wildcard")
            }
            (None, None) => {
                metrics::record_lookup("miss");
                return None;
            }
        };

        let Some(data) = self.nodes[target.0].data.as_ref() else {
            metrics::record_lookup("miss");
            return None;
        };
        metrics::record_lookup(outcome);
        Some(RouteMatch {
            data,
            params: params_found.then(|| captured.into_iter().collect()),
        })
    }

    /// Clear the payload registered at the literal pattern `path`.
    ///
    /// Returns `true` if a payload was found and cleared. A leaf left without
    /// children is detached from its parent, and the parent loses all of its
    /// placeholder and wildcard links along with it.
    pub fn remove(&mut self, path: &str) -> bool {
        let path = normalize_trailing_slash(path, self.options.strict_trailing_slash);
        let sections = segments(path);

        let mut node = NodeId::ROOT;
        for section in &sections {
            match self.nodes[node.0].children.get(*section) {
                Some(&child) => node = child,
                None => return false,
            }
        }

        if self.nodes[node.0].data.take().is_none() {
            return false;
        }
        self.route_count -= 1;
        self.static_routes.remove(path);

        let mut pruned = false;
        let leaf = &self.nodes[node.0];
        if let (true, Some(parent)) = (leaf.children.is_empty(), leaf.parent) {
            let last = sections.last().copied().unwrap_or_default();
            let parent = &mut self.nodes[parent.0];
            parent.children.remove(last);
            parent.wildcard_child = None;
            parent.placeholder_children.clear();
            self.release(node);
            pruned = true;
        }

        tracing::debug!(path = %path, pruned, "Route removed");
        metrics::record_mutation("remove");
        metrics::record_route_count(self.route_count);
        true
    }

    fn pick_placeholder(&self, node: &Node<T>, remaining: usize) -> Option<NodeId> {
        match node.placeholder_children.as_slice() {
            [] => None,
            [only] => Some(*only),
            many => many
                .iter()
                .copied()
                .find(|c| self.nodes[c.0].max_depth == remaining)
                .or_else(|| many.first().copied()),
        }
    }

    fn attach(
        &mut self,
        parent: NodeId,
        section: &str,
        kind: NodeKind,
        anonymous_name: Option<String>,
    ) -> NodeId {
        let mut child = Node::new(kind, Some(parent));
        child.param_name = match kind {
            NodeKind::Placeholder => {
                anonymous_name.or_else(|| Some(section[1..].to_string()).filter(|n| !n.is_empty()))
            }
            NodeKind::Wildcard => Some(wildcard_param_name(section)),
            NodeKind::Normal => None,
        };

        let id = self.alloc(child);
        let parent = &mut self.nodes[parent.0];
        parent.children.insert(section.to_string(), id);
        match kind {
            NodeKind::Placeholder => parent.placeholder_children.push(id),
            NodeKind::Wildcard => parent.wildcard_child = Some(id),
            NodeKind::Normal => {}
        }
        id
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                NodeId(slot)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        self.nodes[id.0] = Node::new(NodeKind::Normal, None);
        self.free.push(id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Option<Params> {
        Some(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn test_static_lookup() {
        let mut router = Router::new();
        router.insert("/about", "about");
        router.insert("/", "home");

        let m = router.lookup("/about").unwrap();
        assert_eq!(*m.data, "about");
        assert!(m.params.is_none());
        assert_eq!(*router.lookup("/").unwrap().data, "home");
        assert!(router.lookup("/missing").is_none());
    }

    #[test]
    fn test_named_placeholder() {
        let mut router = Router::new();
        router.insert("/a/:id", "x");

        let m = router.lookup("/a/42").unwrap();
        assert_eq!(*m.data, "x");
        assert_eq!(m.params, params(&[("id", "42")]));
    }

    #[test]
    fn test_anonymous_placeholders_are_numbered() {
        let mut router = Router::new();
        router.insert("/*/x/*", "anon");

        let m = router.lookup("/a/x/b").unwrap();
        assert_eq!(m.params, params(&[("_0", "a"), ("_1", "b")]));
    }

    #[test]
    fn test_anonymous_numbering_ignores_shared_prefix() {
        let mut router = Router::new();
        router.insert("/*/a", "first");
        router.insert("/*/*", "second");

        let m = router.lookup("/p/q").unwrap();
        assert_eq!(*m.data, "second");
        assert_eq!(m.params, params(&[("_0", "p"), ("_1", "q")]));
    }

    #[test]
    fn test_named_wildcard() {
        let mut router = Router::new();
        router.insert("/files/**:rest", "files");

        let m = router.lookup("/files/a/b/c").unwrap();
        assert_eq!(*m.data, "files");
        assert_eq!(m.params, params(&[("rest", "a/b/c")]));
    }

    #[test]
    fn test_default_wildcard_name() {
        let mut router = Router::new();
        router.insert("/assets/**", "assets");

        let m = router.lookup("/assets/css/site.css").unwrap();
        assert_eq!(m.params, params(&[("_", "css/site.css")]));
    }

    #[test]
    fn test_literal_beats_placeholder_beats_wildcard() {
        let mut router = Router::new();
        router.insert("/u/me", "me");
        router.insert("/u/:id", "user");
        router.insert("/u/**:rest", "rest");

        assert_eq!(*router.lookup("/u/me").unwrap().data, "me");
        assert_eq!(*router.lookup("/u/7").unwrap().data, "user");
        let m = router.lookup("/u/7/posts").unwrap();
        assert_eq!(*m.data, "rest");
        assert_eq!(m.params, params(&[("id", "7"), ("rest", "7/posts")]));
    }

    #[test]
    fn test_wildcard_fallback_keeps_walk_captures() {
        let mut router = Router::new();
        router.insert("/org/:org/:team/members", "members");
        router.insert("/org/:org/**:path", "tree");

        let m = router.lookup("/org/acme/core/members").unwrap();
        assert_eq!(*m.data, "members");
        assert_eq!(m.params, params(&[("org", "acme"), ("team", "core")]));

        // `:team` captured "core" before the walk dead-ended; it stays.
        let m = router.lookup("/org/acme/core/issues").unwrap();
        assert_eq!(*m.data, "tree");
        assert_eq!(
            m.params,
            params(&[("org", "acme"), ("team", "core"), ("path", "core/issues")])
        );
    }

    #[test]
    fn test_ambiguous_placeholders_pick_by_depth() {
        let mut router = Router::new();
        router.insert("/a/:x/c", "short");
        router.insert("/a/:y/c/d", "long");

        let m = router.lookup("/a/1/c/d").unwrap();
        assert_eq!(*m.data, "long");
        assert_eq!(m.params, params(&[("y", "1")]));

        let m = router.lookup("/a/1/c").unwrap();
        assert_eq!(*m.data, "short");
        assert_eq!(m.params, params(&[("x", "1")]));
    }

    #[test]
    fn test_ambiguous_placeholders_fall_back_to_first() {
        let mut router = Router::new();
        router.insert("/a/:x/c", "short");
        router.insert("/a/:y/c/d", "long");

        // No branch is five segments deep; the first one is walked and misses.
        assert!(router.lookup("/a/1/c/d/e").is_none());
    }

    #[test]
    fn test_max_depth_tracks_longest_chain() {
        let mut router = Router::new();
        let short = router.insert("/a/:id", 1);
        router.insert("/a/:id/b/c", 2);

        assert_eq!(router.node(short).unwrap().max_depth(), 3);
        assert_eq!(router.node(short).unwrap().kind(), NodeKind::Placeholder);
        assert_eq!(router.node(short).unwrap().param_name(), Some("id"));
    }

    #[test]
    fn test_duplicate_insert_overwrites() {
        let mut router = Router::new();
        router.insert("/p", 1);
        router.insert("/p", 2);

        assert_eq!(*router.lookup("/p").unwrap().data, 2);
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let mut router = Router::new();
        router.insert("/a/", "a");

        assert_eq!(*router.lookup("/a").unwrap().data, "a");
        assert_eq!(*router.lookup("/a/").unwrap().data, "a");
    }

    #[test]
    fn test_strict_trailing_slash() {
        let mut router = Router::with_options(RouterOptions {
            strict_trailing_slash: true,
        });
        router.insert("/a", "a");

        assert!(router.lookup("/a").is_some());
        assert!(router.lookup("/a/").is_none());
    }

    #[test]
    fn test_remove_requires_exact_payload() {
        let mut router = Router::new();
        router.insert("/a/:id/b", "deep");

        assert!(!router.remove("/a/:id"));
        router.insert("/a/:id", "shallow");
        assert!(router.remove("/a/:id"));
        assert!(!router.remove("/a/:id"));
        assert!(!router.remove("/never"));
    }

    #[test]
    fn test_remove_round_trip() {
        let mut router = Router::new();
        router.insert("/solo/path", "v");
        assert!(router.remove("/solo/path"));

        assert!(router.lookup("/solo/path").is_none());
        assert!(router.is_empty());
    }

    #[test]
    fn test_remove_prunes_sibling_dynamic_links() {
        let mut router = Router::new();
        router.insert("/a/:id", "id");
        router.insert("/a/**:rest", "rest");
        router.insert("/a/leaf", "leaf");

        assert!(router.remove("/a/leaf"));
        // The parent lost its placeholder and wildcard links as well.
        assert!(router.lookup("/a/1").is_none());
        assert!(router.lookup("/a/1/2").is_none());
    }

    #[test]
    fn test_pruned_slot_is_reused() {
        let mut router = Router::new();
        router.insert("/x", 1);
        let first = router.insert("/x/y", 2);
        assert!(router.remove("/x/y"));

        let second = router.insert("/x/z", 3);
        assert_eq!(first, second);
        assert_eq!(*router.lookup("/x/z").unwrap().data, 3);
        assert!(router.lookup("/x/y").is_none());
    }

    #[test]
    fn test_match_to_json_merges_params() {
        let mut router = Router::new();
        router.insert("/u/:id", serde_json::json!({ "handler": "user" }));
        router.insert("/n/:id", serde_json::json!(7));

        let value = router.lookup("/u/5").unwrap().to_json().unwrap();
        assert_eq!(value, serde_json::json!({ "handler": "user", "params": { "id": "5" } }));

        let value = router.lookup("/n/5").unwrap().to_json().unwrap();
        assert_eq!(value, serde_json::json!({ "data": 7, "params": { "id": "5" } }));
    }
}
