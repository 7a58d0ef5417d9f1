//! # kvconf
//!
//! An embeddable settings store:
//! - Unique keys kept in first-insertion order
//! - Typed getters and setters for text, integers and floats
//! - A plain `key = value` file format with unbounded line length
//! - Pluggable allocation capability for out-of-memory testing
//!
//! ## Architecture Overview
//!
//! ```text
//!            load                              save
//!              │                                 ▲
//!   ┌──────────▼──────────┐           ┌──────────┴──────────┐
//!   │     LineReader      │           │     Serializer      │
//!   │  (chunked growth)   │           │  (key = value\n)    │
//!   └──────────┬──────────┘           └──────────▲──────────┘
//!              │                                 │
//!   ┌──────────▼──────────┐                      │
//!   │       Parser        │                      │
//!   │ (first '=', trim)   │                      │
//!   └──────────┬──────────┘                      │
//!              │                                 │
//!   ┌──────────▼─────────────────────────────────┴──────────┐
//!   │                     OrderedMap                        │
//!   │        (arena linked list, unique keys)               │
//!   └──────────▲────────────────────────────────────────────┘
//!              │ get/set string, int, float
//!   ┌──────────┴──────────┐
//!   │        Store        │
//!   └─────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use kvconf::Store;
//!
//! let mut store = Store::new();
//! store.set_string("name", "demo").unwrap();
//! store.set_int("retries", 3).unwrap();
//!
//! assert_eq!(store.get_string("name", "none"), "demo");
//! assert_eq!(store.get_int("retries", 0), 3);
//! assert_eq!(store.get_float("missing", 1.5), 1.5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod alloc;
pub mod map;
pub mod reader;
pub mod format;
pub mod store;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ConfError, Result};
pub use config::Config;
pub use store::{LoadStats, Store};
pub use shared::SharedStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvconf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
