//! Input/output helpers.
//!
//! - CSV / inline ingest + validation (`ingest`)
//! - JSON analysis and CSV table exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
