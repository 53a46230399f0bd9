//! Temporal computation shared by the sample stores.
//!
//! - `search`: boundary search over sorted timestamps
//! - `grid`: quantization of timestamps into fixed-width slots

pub mod grid;
pub mod search;
