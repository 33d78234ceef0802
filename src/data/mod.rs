//! Data sources other than user input.
//!
//! - seeded synthetic samples from a chosen family (`sample`)

pub mod sample;

pub use sample::*;
