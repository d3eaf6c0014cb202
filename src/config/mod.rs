//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routes file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (pattern checks, duplicates)
//!     → RouterConfig (validated, immutable)
//!     → Router::from_config / RouteTable::reload
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → RouteTable swaps in a freshly built router
//! ```
//!
//! # Design Decisions
//! - Routes are an ordered array so registration order is the file order
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogFormat, ObservabilityConfig, RouteEntry, RouterConfig};
