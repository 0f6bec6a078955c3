//! Reference filters the compactor is measured against.
//!
//! `sequential` is the single-threaded ground truth every variant is
//! validated against; `rayon_filter` is the work-stealing library baseline.

pub mod rayon_filter;
pub mod sequential;
