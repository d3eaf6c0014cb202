//! Radix tree path router.
//!
//! Maps `/`-delimited path patterns to arbitrary payloads:
//! - literal segments (`/about`)
//! - named and anonymous placeholders (`/users/:id`, `/*/edit`)
//! - trailing wildcards (`/files/**:rest`, `/assets/**`)
//!
//! ```
//! use radix_router::Router;
//!
//! let mut router = Router::new();
//! router.insert("/users/:id", "user");
//! router.insert("/files/**:rest", "files");
//!
//! let m = router.lookup("/users/42").unwrap();
//! assert_eq!(*m.data, "user");
//! assert_eq!(m.params.unwrap()["id"], "42");
//!
//! let m = router.lookup("/files/a/b").unwrap();
//! assert_eq!(m.params.unwrap()["rest"], "a/b");
//! ```

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use routing::{
    NodeId, NodeKind, Params, PatternError, RouteMatch, RouteSet, RouteTable, Router,
    RouterOptions, SharedRouter,
};
