//! The monthly amortization loop and its outputs.

pub mod portfolio_gen;
pub mod schedule;
pub mod simulator;
pub mod waterfall;
