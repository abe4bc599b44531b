//! Utilities shared by the pipeline edges
//!
//! File IO for inputs and outputs, and logging/progress helpers.

pub mod io;
pub mod logging;
