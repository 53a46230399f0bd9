//! Compute layer for temporal lookups.
//!
//! The functions here are pure and independent of how samples are stored;
//! the engines in `storage` call into them for every insert and query.

pub mod temporal;
