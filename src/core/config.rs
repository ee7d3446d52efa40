use crate::core::error::ValidationError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default simulation horizon: ten years of monthly payments.
pub const DEFAULT_HORIZON: u32 = 120;

/// Default tolerance under which two interest totals count as tied.
pub const DEFAULT_TIE_TOLERANCE: Decimal = dec!(0.005);

/// When the priority order is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Rank once from the initial balances and rates; the order is held for
    /// the whole run.
    #[default]
    Static,
    /// Re-rank at the start of every month from that month's opening
    /// balances.
    Dynamic,
}

/// Where the minimum payment of an already retired debt goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreedMinimumRouting {
    /// Added to the budget handed to the next-ranked debt in the same month.
    #[default]
    NextInRank,
    /// Added to the rank-1 budget at the start of the month; retired debts
    /// then pass the budget through unchanged.
    FirstInRank,
}

/// Run parameters shared by a single simulation and a comparison.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::core::config::{RankingMode, SimulationConfig};
/// use rust_decimal_macros::dec;
///
/// let config = SimulationConfig::default()
///     .with_extra_payment(dec!(200))
///     .with_horizon(60)
///     .with_ranking(RankingMode::Dynamic);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.horizon, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Constant monthly surplus on top of all minimum payments.
    pub extra_payment: Decimal,
    /// Maximum number of months to simulate.
    pub horizon: u32,
    pub ranking: RankingMode,
    pub freed_minimums: FreedMinimumRouting,
    /// Interest totals closer than this are reported as a tie.
    pub tie_tolerance: Decimal,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            extra_payment: Decimal::ZERO,
            horizon: DEFAULT_HORIZON,
            ranking: RankingMode::Static,
            freed_minimums: FreedMinimumRouting::NextInRank,
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
        }
    }
}

impl SimulationConfig {
    pub fn new(extra_payment: Decimal, horizon: u32) -> Self {
        Self {
            extra_payment,
            horizon,
            ..Default::default()
        }
    }

    pub fn with_extra_payment(mut self, extra_payment: Decimal) -> Self {
        self.extra_payment = extra_payment;
        self
    }

    pub fn with_horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_ranking(mut self, ranking: RankingMode) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_freed_minimums(mut self, routing: FreedMinimumRouting) -> Self {
        self.freed_minimums = routing;
        self
    }

    pub fn with_tie_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tie_tolerance = tolerance;
        self
    }

    /// Reject parameters that cannot be simulated.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.extra_payment < Decimal::ZERO {
            return Err(ValidationError::NegativeExtraPayment {
                extra_payment: self.extra_payment,
            });
        }
        if self.horizon == 0 {
            return Err(ValidationError::ZeroHorizon);
        }
        if self.tie_tolerance < Decimal::ZERO {
            return Err(ValidationError::NegativeTieTolerance {
                tolerance: self.tie_tolerance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.extra_payment, Decimal::ZERO);
        assert_eq!(config.horizon, 120);
        assert_eq!(config.ranking, RankingMode::Static);
        assert_eq!(config.freed_minimums, FreedMinimumRouting::NextInRank);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_extra_payment() {
        let config = SimulationConfig::new(dec!(-0.01), 12);
        assert_eq!(
            config.validate(),
            Err(ValidationError::NegativeExtraPayment {
                extra_payment: dec!(-0.01)
            })
        );
    }

    #[test]
    fn test_zero_horizon() {
        let config = SimulationConfig::new(dec!(100), 0);
        assert_eq!(config.validate(), Err(ValidationError::ZeroHorizon));
    }

    #[test]
    fn test_negative_tolerance() {
        let config = SimulationConfig::default().with_tie_tolerance(dec!(-1));
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NegativeTieTolerance { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "extra_payment": "200", "ranking": "dynamic" }"#).unwrap();
        assert_eq!(config.extra_payment, dec!(200));
        assert_eq!(config.horizon, DEFAULT_HORIZON);
        assert_eq!(config.ranking, RankingMode::Dynamic);
        assert_eq!(config.freed_minimums, FreedMinimumRouting::NextInRank);
    }
}
