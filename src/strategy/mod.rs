//! Trading strategy module
//!
//! Crossover rules that turn MACD lines into buy and sell decisions.

pub mod crossover;

pub use crossover::*;
