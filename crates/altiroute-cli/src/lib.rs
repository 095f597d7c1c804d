//! altiroute CLI library.
//!
//! Terminal styling and output formatting shared by the `altiroute` binary
//! and its tests.

pub mod output;
pub mod terminal;
