//! ATTRMAP - Core Type Definitions
//! Defines the key and value types used across the crate.

/// Key type for the map.
/// `i64` matches the pointer-width integer keys of the source data model.
pub type Key = i64;

/// Value type for the map.
/// All values are stored as strings; typed reads coerce on the way out.
pub type Value = String;
