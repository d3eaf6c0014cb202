//! Lock-guarded router handle for concurrent callers.

use std::sync::{Arc, PoisonError, RwLock};

use crate::routing::node::NodeId;
use crate::routing::router::{RouteMatch, Router, RouterOptions};

/// A cloneable handle to one router behind a single lock.
///
/// Mutations take the write lock; lookups share the read lock and return
/// owned matches so no guard escapes.
#[derive(Debug)]
pub struct SharedRouter<T> {
    inner: Arc<RwLock<Router<T>>>,
}

impl<T> Clone for SharedRouter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedRouter<T> {
    fn default() -> Self {
        Self::new(Router::default())
    }
}

impl<T> SharedRouter<T> {
    pub fn new(router: Router<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(router)),
        }
    }

    pub fn with_options(options: RouterOptions) -> Self {
        Self::new(Router::with_options(options))
    }

    pub fn insert(&self, path: &str, data: T) -> NodeId {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, data)
    }

    pub fn remove(&self, path: &str) -> bool {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> SharedRouter<T> {
    pub fn lookup(&self, path: &str) -> Option<RouteMatch<T>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lookup(path)
            .map(RouteMatch::cloned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_shared_mutation_visible_to_clones() {
        let router = SharedRouter::default();
        let other = router.clone();

        router.insert("/a/:id", "a".to_string());
        let m = other.lookup("/a/1").unwrap();
        assert_eq!(m.data, "a");
        assert_eq!(m.params.unwrap()["id"], "1");

        assert!(other.remove("/a/:id"));
        assert!(router.lookup("/a/1").is_none());
    }

    #[test]
    fn test_concurrent_registration() {
        let router = SharedRouter::default();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let router = router.clone();
                thread::spawn(move || {
                    router.insert(&format!("/worker/{i}"), i);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(router.len(), 8);
        for i in 0..8 {
            assert_eq!(router.lookup(&format!("/worker/{i}")).unwrap().data, i);
        }
    }
}
