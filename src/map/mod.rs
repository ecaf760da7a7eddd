//! ATTRMAP - Map Module
//! Top-level module for the concurrent map and its observability counters.

pub mod int_string;
pub mod metrics;

pub use self::int_string::IntStringMap;
pub use self::metrics::MapMetrics;
