//! Goodness-of-fit pipeline.
//!
//! Responsibilities, per family:
//!
//! - build the expected-frequency table from fitted parameters
//! - merge low-expectation categories until each reaches the threshold
//! - reduce the merged table to a chi-squared statistic
//!
//! and, across families, select the lowest statistic (parallel, deterministic).

pub mod chi_squared;
pub mod merge;
pub mod selection;
pub mod table;

pub use chi_squared::*;
pub use merge::*;
pub use selection::*;
pub use table::*;
