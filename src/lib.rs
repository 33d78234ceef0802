//! `distfit` library crate.
//!
//! Chi-squared goodness of fit of an observed frequency table against the
//! Poisson, Binomial, Geometric and discrete Uniform families.
//!
//! The binary (`distfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fitting pipeline (`fit`, `models`) stays free of I/O

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod models;
pub mod plot;
pub mod report;
