//! # ATTRMAP
//!
//! A concurrency-safe map from integer keys to string values with:
//! - Single reader/writer lock guarding the whole table
//! - Atomic batch insert/remove and check-and-insert
//! - Lenient typed reads (bool, ints, floats, timestamp, duration) that
//!   coerce invalid input to zero values instead of failing
//! - Callback access under shared or exclusive lock for composite operations
//! - Lock-free metrics counters
//!
//! ## Read Contract
//!
//! Reads never error. An absent key reads as `""`, and the typed getters run
//! the stored string through [`convert`]'s try-convert-or-zero layer:
//! `get_i64` on `"abc"` is `0`, `get_time` on junk is the Unix epoch. Callers
//! that need existence information use [`IntStringMap::contains`].
//!
//! ## Example
//! ```
//! use attrmap::IntStringMap;
//!
//! let map = IntStringMap::new();
//!
//! map.insert(1, "10");
//! assert_eq!(map.get_i64(1), 10);
//! assert!(!map.get_bool(1)); // "10" is not a truthy token
//!
//! map.remove(1);
//! assert_eq!(map.get(1), "");
//! assert!(!map.contains(1));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod convert;
pub mod error;
pub mod map;
pub mod types;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ConvertError, Result};
pub use map::{IntStringMap, MapMetrics};
pub use types::{Key, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of attrmap
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
