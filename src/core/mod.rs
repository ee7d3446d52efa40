//! Inputs to the engine: debts, run parameters and validation.

pub mod config;
pub mod debt;
pub mod error;
pub mod portfolio;
