//! Lamassu core crate.
//!
//! This crate owns the value primitives shared by the markup loader and
//! higher layers, plus the logging bootstrap.

pub mod coords;
pub mod logging;
pub mod paint;
