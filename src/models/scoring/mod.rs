//! Hangout point scoring: attendance overrides, family-size halving and
//! capped bonus stacking. Pure functions, no I/O.

pub mod calculator;
pub mod types;

pub use calculator::*;
pub use types::*;
