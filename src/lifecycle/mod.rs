//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Ctrl-C received → trigger → long-running loops observe and exit
//! ```

pub mod shutdown;
