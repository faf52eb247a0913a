//! Market data structures
//!
//! Daily and intraday bars as returned by the kline provider.

pub mod bar;
pub mod minute;

pub use bar::*;
pub use minute::*;
