//! Configuration module

pub mod app;
pub mod search;
pub mod monitor;
pub mod screener;

pub use app::*;
pub use search::*;
pub use monitor::*;
pub use screener::*;
