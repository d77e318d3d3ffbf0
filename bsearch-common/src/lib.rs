//! Shared plumbing for the `bsearch` crates.
//!
//! Right now this is only [`observability`]: the one place that decides where
//! `tracing` events go. Binaries call [`observability::init_logging`] once at
//! start-up; libraries just emit events.
//!
//! ```rust
//! use bsearch_common::observability::{LogConfig, LogFormat};
//!
//! let cfg = LogConfig::default();
//! assert_eq!(cfg.app_name, "b");
//! assert!(matches!(cfg.format, LogFormat::Text));
//! ```

pub mod observability;
