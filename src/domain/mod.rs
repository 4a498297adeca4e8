//! Core domain types and logic.

pub mod price;
pub mod indicator;
pub mod signal;
pub mod position;
pub mod ledger;
pub mod equity;
pub mod simulator;
pub mod aggregate;
pub mod summary;
pub mod backtest;
pub mod strategy;
pub mod universe;
pub mod volatility;
pub mod config_validation;
pub mod error;
