//! # debt-payoff-engine
//!
//! Multi-debt monthly amortization simulator.
//!
//! Given a list of debts, a constant monthly extra payment and a horizon,
//! this engine computes month-by-month payoff schedules under the
//! snowball (smallest balance first) and avalanche (highest rate first)
//! orderings, cascading freed payment capacity down the priority order as
//! debts are retired.
//!
//! ## Architecture
//!
//! - **core** — Debts, run configuration, validation, portfolio figures
//! - **strategy** — Ordering policies and the ranking they produce
//! - **simulation** — Monthly waterfall cascade and the schedule it builds
//! - **analysis** — Per-run summaries and the side-by-side comparison

pub mod analysis;
pub mod core;
pub mod simulation;
pub mod strategy;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::analysis::comparison::{Comparison, ComparisonResult, Recommendation};
    pub use crate::analysis::summary::{PayoffMonth, Summary};
    pub use crate::core::config::{FreedMinimumRouting, RankingMode, SimulationConfig};
    pub use crate::core::debt::{Debt, DebtEntry, DebtId, DebtKind, DebtRegistry};
    pub use crate::core::error::ValidationError;
    pub use crate::core::portfolio::PortfolioSnapshot;
    pub use crate::simulation::schedule::{MonthRecord, MonthTotals, Schedule};
    pub use crate::simulation::simulator::Simulator;
    pub use crate::strategy::policy::{PayoffPolicy, Ranking};
}
