//! In-memory time-indexed sample stores with closest and range lookups.
//!
//! ## Engines
//! - **`OrderedSamples`**: growable list kept sorted by binary-search
//!   insertion. Suits sparse or irregular arrivals.
//! - **`FixedSamples`**: pre-allocated grid of fixed-width slots over a
//!   bounded window. Suits dense, regular polling.
//!
//! Both answer the same questions through the [`TimeStore`] trait: the
//! closest sample at or before / at or after a time, and every sample on
//! either side of it. Values are opaque and never inspected.
//!
//! ```rust
//! use timestore::{FixedSamples, OrderedSamples};
//! use std::time::{Duration, UNIX_EPOCH};
//!
//! let since = UNIX_EPOCH;
//! let mut list = OrderedSamples::new();
//! let mut grid = FixedSamples::new(since, Duration::from_millis(500), Duration::from_secs(60))?;
//!
//! let t = since + Duration::from_millis(2_499);
//! list.insert(t, 21.5_f32);
//! grid.insert(t, 21.5_f32)?;
//!
//! assert_eq!(list.closest_before(t + Duration::from_secs(1)).map(|s| s.timestamp), Some(t));
//! // The grid reports the nominal time of the slot holding the sample
//! assert_eq!(
//!     grid.closest_before(t).map(|s| s.timestamp),
//!     Some(since + Duration::from_secs(2))
//! );
//! # Ok::<(), timestore::TimestoreError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod error;
pub mod storage;
pub mod types;

#[cfg(feature = "sync")]
pub mod sync;

pub use builder::GridBuilder;
pub use error::{Result, TimestoreError};

pub use compute::temporal::grid::Position;
pub use storage::{FixedSamples, OrderedSamples, SampleIter, TimeStore};
pub use types::{GridConfig, GridEntry, Sample, StoreStats};

#[cfg(feature = "sync")]
pub use sync::SyncStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GridBuilder, Result, TimestoreError};

    pub use crate::{FixedSamples, OrderedSamples, TimeStore};

    pub use crate::{GridConfig, GridEntry, Sample, StoreStats};

    #[cfg(feature = "sync")]
    pub use crate::SyncStore;

    pub use std::time::{Duration, SystemTime};
}
