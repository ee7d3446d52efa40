use crate::analysis::summary::Summary;
use crate::core::config::SimulationConfig;
use crate::core::debt::DebtRegistry;
use crate::core::error::ValidationError;
use crate::simulation::simulator::Simulator;
use crate::strategy::policy::PayoffPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which ordering the comparison recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Snowball,
    Avalanche,
    /// Interest totals are equal within the configured tolerance.
    Tied,
}

impl Recommendation {
    /// The recommended policy, or `None` for a tie.
    pub fn policy(&self) -> Option<PayoffPolicy> {
        match self {
            Recommendation::Snowball => Some(PayoffPolicy::Snowball),
            Recommendation::Avalanche => Some(PayoffPolicy::Avalanche),
            Recommendation::Tied => None,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Snowball => f.write_str("Snowball saves more"),
            Recommendation::Avalanche => f.write_str("Avalanche saves more"),
            Recommendation::Tied => f.write_str("Tied"),
        }
    }
}

/// Side-by-side results of the two orderings over the same inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub snowball: Summary,
    pub avalanche: Summary,
    /// `|interest(snowball) - interest(avalanche)|`.
    pub interest_saved: Decimal,
    /// Difference in payoff months, using the horizon for "not reached".
    pub months_difference: u32,
    /// `|paid(snowball) - paid(avalanche)|`.
    pub total_paid_difference: Decimal,
    /// Shorter of the two payoff times, using the horizon for "not reached".
    pub best_months_to_payoff: u32,
    pub recommended: Recommendation,
}

impl ComparisonResult {
    /// Combine two independently produced summaries.
    pub fn from_summaries(snowball: Summary, avalanche: Summary, tie_tolerance: Decimal) -> Self {
        let interest_saved = (snowball.total_interest_paid - avalanche.total_interest_paid).abs();
        let total_paid_difference =
            (snowball.total_amount_paid - avalanche.total_amount_paid).abs();

        let snowball_months = snowball.months_to_payoff.display_months();
        let avalanche_months = avalanche.months_to_payoff.display_months();

        let recommended = if interest_saved <= tie_tolerance {
            Recommendation::Tied
        } else if snowball.total_interest_paid < avalanche.total_interest_paid {
            Recommendation::Snowball
        } else {
            Recommendation::Avalanche
        };

        ComparisonResult {
            snowball,
            avalanche,
            interest_saved,
            months_difference: snowball_months.abs_diff(avalanche_months),
            total_paid_difference,
            best_months_to_payoff: snowball_months.min(avalanche_months),
            recommended,
        }
    }

    pub fn summary(&self, policy: PayoffPolicy) -> &Summary {
        match policy {
            PayoffPolicy::Snowball => &self.snowball,
            PayoffPolicy::Avalanche => &self.avalanche,
        }
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Method Comparison ===")?;
        writeln!(f, "{:<24}{:>18}{:>18}", "Metric", "Snowball", "Avalanche")?;
        writeln!(
            f,
            "{:<24}{:>18}{:>18}",
            "Months to Payoff",
            self.snowball.months_to_payoff.display_months(),
            self.avalanche.months_to_payoff.display_months()
        )?;
        writeln!(
            f,
            "{:<24}{:>18}{:>18}",
            "Total Interest",
            self.snowball.total_interest_paid.round_dp(2),
            self.avalanche.total_interest_paid.round_dp(2)
        )?;
        writeln!(
            f,
            "{:<24}{:>18}{:>18}",
            "Total Paid",
            self.snowball.total_amount_paid.round_dp(2),
            self.avalanche.total_amount_paid.round_dp(2)
        )?;
        writeln!(f)?;
        writeln!(f, "Interest Saved:      {}", self.interest_saved.round_dp(2))?;
        writeln!(f, "Months Difference:   {}", self.months_difference)?;
        writeln!(f, "Paid Difference:     {}", self.total_paid_difference.round_dp(2))?;
        writeln!(f, "Best Payoff:         {} months", self.best_months_to_payoff)?;
        writeln!(f, "Recommendation:      {}", self.recommended)?;
        for summary in [&self.snowball, &self.avalanche] {
            if !summary.months_to_payoff.is_reached() {
                writeln!(f, "Note: {} {}", summary.policy, summary.months_to_payoff)?;
            }
        }
        Ok(())
    }
}

/// Runs both orderings against the same inputs and compares them.
pub struct Comparison;

impl Comparison {
    /// Validate once, then simulate Snowball and Avalanche independently.
    ///
    /// The two runs share nothing mutable and execute in parallel; neither
    /// re-validates.
    pub fn run(
        registry: &DebtRegistry,
        config: &SimulationConfig,
    ) -> Result<ComparisonResult, ValidationError> {
        config.validate()?;
        registry.validate()?;

        let simulator = Simulator::new(config.clone());
        let summarize = |policy: PayoffPolicy| {
            Summary::from_schedule(&simulator.run(&policy.rank_validated(registry)))
        };
        let (snowball, avalanche) = rayon::join(
            || summarize(PayoffPolicy::Snowball),
            || summarize(PayoffPolicy::Avalanche),
        );

        let result = ComparisonResult::from_summaries(snowball, avalanche, config.tie_tolerance);
        log::info!(
            "compared {} debts over {} months: {} (interest saved {})",
            registry.len(),
            config.horizon,
            result.recommended,
            result.interest_saved.round_dp(2)
        );
        Ok(result)
    }
}
