//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     file route path → pattern.rs (compile, validate, dedupe)
//!     pattern         → router.rs insert (node.rs trie, static map)
//!
//! Lookup:
//!     request path → path.rs (trailing slash policy, segments)
//!                  → router.rs lookup
//!                  → RouteMatch { data, params } or None
//!
//! Sharing:
//!     shared.rs  one RwLock around a mutable router
//!     table.rs   immutable snapshots swapped on reload
//! ```
//!
//! # Design Decisions
//! - Nodes live in an arena; parent links are indices, not owners
//! - Literal routes bypass the trie through a direct map
//! - The router never errors; absence is `None`, removal is a `bool`

pub mod node;
pub mod path;
pub mod pattern;
pub mod router;
pub mod shared;
pub mod table;

pub use node::{Node, NodeId, NodeKind};
pub use pattern::{compile_file_route, validate_pattern, PatternError, RouteSet};
pub use router::{Params, RouteMatch, Router, RouterOptions};
pub use shared::SharedRouter;
pub use table::RouteTable;
