//! Intraday monitoring module
//!
//! Polls the minute feed during Shanghai trading hours and appends
//! buy/sell alerts to a markdown signal log.

pub mod session;
pub mod watch;

pub use session::*;
pub use watch::*;
