//! Hot-swappable route table.
//!
//! # Design Decisions
//! - Readers load an `Arc` snapshot without locking
//! - A reload builds a complete router off to the side, then swaps it in
//! - In-flight lookups finish against the snapshot they started with

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::RouterConfig;
use crate::observability::metrics;
use crate::routing::router::{RouteMatch, Router};

/// Route table whose router can be replaced atomically.
pub struct RouteTable<T> {
    current: ArcSwap<Router<T>>,
}

impl<T> RouteTable<T> {
    pub fn new(router: Router<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    pub fn from_config(config: RouterConfig<T>) -> Self {
        let table = Self::new(Router::from_config(config));
        tracing::info!(routes = table.len(), "Route table loaded");
        table
    }

    /// The router currently serving lookups.
    pub fn snapshot(&self) -> Arc<Router<T>> {
        self.current.load_full()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the table with one built from `config`. Returns the new route count.
    pub fn reload(&self, config: RouterConfig<T>) -> usize {
        let router = Router::from_config(config);
        let routes = router.len();
        self.current.store(Arc::new(router));

        metrics::record_reload("applied");
        tracing::info!(routes, "Route table reloaded");
        routes
    }
}

impl<T: Clone> RouteTable<T> {
    pub fn lookup(&self, path: &str) -> Option<RouteMatch<T>> {
        self.current.load().lookup(path).map(RouteMatch::cloned)
    }
}
