//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the observed input (`ObservedData`)
//! - the candidate families and their fitted parameters (`Family`, `FittedParameters`)
//! - frequency tables before and after category merging (`FrequencyTable`)
//! - per-family fit outputs (`FamilyFit`) and run configuration (`AnalysisConfig`)

pub mod types;

pub use types::*;
