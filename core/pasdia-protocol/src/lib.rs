#![no_std] // The data model has no I/O of its own

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod roles;

// Re-export core types for convenience
pub use ids::{ArgumentId, SegmentId};
pub use roles::*;

pub mod model;
pub use model::*;
