//! Backtesting module
//!
//! Replays MACD crossover trades over daily history and searches the
//! parameter grid for the triple with the best win rate.

pub mod search;
pub mod simulator;

pub use search::*;
pub use simulator::*;
