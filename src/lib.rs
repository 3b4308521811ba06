//! Photo Studio CLI ライブラリ

pub mod cli;
pub mod config;
pub mod editing;
pub mod error;
pub mod logger;
pub mod scanner;
