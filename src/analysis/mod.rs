//! Reductions over finished schedules: per-run summaries and the
//! snowball-versus-avalanche comparison.

pub mod comparison;
pub mod summary;
