use crate::core::debt::DebtId;
use crate::simulation::schedule::Schedule;
use crate::strategy::policy::PayoffPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The month in which a balance first reached zero, or the sentinel for a
/// balance still owed when the horizon ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffMonth {
    Month(u32),
    NotReached { horizon: u32 },
}

impl PayoffMonth {
    pub fn is_reached(&self) -> bool {
        matches!(self, PayoffMonth::Month(_))
    }

    /// The exact payoff month, if one was reached.
    pub fn month(&self) -> Option<u32> {
        match self {
            PayoffMonth::Month(m) => Some(*m),
            PayoffMonth::NotReached { .. } => None,
        }
    }

    /// Month count for display: the horizon stands in for "not reached".
    pub fn display_months(&self) -> u32 {
        match self {
            PayoffMonth::Month(m) => *m,
            PayoffMonth::NotReached { horizon } => *horizon,
        }
    }
}

impl fmt::Display for PayoffMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffMonth::Month(m) => write!(f, "{} months", m),
            PayoffMonth::NotReached { horizon } => {
                write!(f, "not reached within {} months", horizon)
            }
        }
    }
}

/// When one debt was retired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub debt: DebtId,
    pub payoff: PayoffMonth,
}

/// Headline results of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub policy: PayoffPolicy,
    pub months_to_payoff: PayoffMonth,
    pub total_interest_paid: Decimal,
    pub total_amount_paid: Decimal,
    /// Per-debt payoff months, in input order.
    pub debt_payoffs: Vec<DebtPayoff>,
}

impl Summary {
    /// Reduce a schedule to its summary.
    ///
    /// Purely a scan over the schedule's records; months after payoff
    /// contribute zero, so summing the full horizon is exact.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let horizon = schedule.horizon();
        let not_reached = PayoffMonth::NotReached { horizon };

        let months_to_payoff = schedule
            .months()
            .iter()
            .find(|m| m.totals.total_remaining_balance <= Decimal::ZERO)
            .map_or(not_reached, |m| PayoffMonth::Month(m.month));

        let total_interest_paid = schedule
            .totals()
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.total_interest));
        let total_amount_paid = schedule
            .totals()
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.total_payment));

        let mut ids: Vec<DebtId> = schedule.order().to_vec();
        ids.sort();
        let debt_payoffs = ids
            .into_iter()
            .map(|debt| {
                let payoff = schedule
                    .months()
                    .iter()
                    .find(|m| m.record(debt).is_some_and(|r| r.is_paid_off()))
                    .map_or(not_reached, |m| PayoffMonth::Month(m.month));
                DebtPayoff { debt, payoff }
            })
            .collect();

        Summary {
            policy: schedule.policy(),
            months_to_payoff,
            total_interest_paid,
            total_amount_paid,
            debt_payoffs,
        }
    }

    /// Payoff month of one debt.
    pub fn payoff_of(&self, debt: DebtId) -> Option<PayoffMonth> {
        self.debt_payoffs
            .iter()
            .find(|p| p.debt == debt)
            .map(|p| p.payoff)
    }

    /// Fraction of everything paid that went to interest.
    pub fn interest_share(&self) -> f64 {
        if self.total_amount_paid == Decimal::ZERO {
            return 0.0;
        }
        let share = self.total_interest_paid / self.total_amount_paid;
        share.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} Plan ===", self.policy)?;
        writeln!(f, "Payoff:          {}", self.months_to_payoff)?;
        writeln!(f, "Total Interest:  {}", self.total_interest_paid.round_dp(2))?;
        writeln!(f, "Total Paid:      {}", self.total_amount_paid.round_dp(2))?;
        write!(f, "Interest Share:  {:.1}%", self.interest_share() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::debt::{DebtEntry, DebtRegistry};
    use crate::simulation::simulator::Simulator;
    use approx::assert_abs_diff_eq;
    use rust_decimal_macros::dec;

    fn summarize(registry: &DebtRegistry, extra: Decimal, horizon: u32) -> Summary {
        let schedule = Simulator::new(SimulationConfig::new(extra, horizon))
            .plan(registry, PayoffPolicy::Snowball)
            .unwrap();
        Summary::from_schedule(&schedule)
    }

    #[test]
    fn test_single_payment_payoff() {
        let registry: DebtRegistry = [DebtEntry::new("Phone", dec!(100), dec!(0), dec!(100))]
            .into_iter()
            .collect();
        let summary = summarize(&registry, Decimal::ZERO, 120);

        assert_eq!(summary.months_to_payoff, PayoffMonth::Month(1));
        assert_eq!(summary.total_interest_paid, Decimal::ZERO);
        assert_eq!(summary.total_amount_paid, dec!(100));
        assert_eq!(summary.interest_share(), 0.0);
    }

    #[test]
    fn test_horizon_saturation_reports_sentinel() {
        let registry: DebtRegistry = [DebtEntry::new("Deep", dec!(100000), dec!(0.20), dec!(10))]
            .into_iter()
            .collect();
        let summary = summarize(&registry, Decimal::ZERO, 12);

        assert_eq!(summary.months_to_payoff, PayoffMonth::NotReached { horizon: 12 });
        assert!(!summary.months_to_payoff.is_reached());
        assert_eq!(summary.months_to_payoff.month(), None);
        assert_eq!(summary.months_to_payoff.display_months(), 12);
        assert_eq!(summary.total_amount_paid, dec!(120));
    }

    #[test]
    fn test_interest_total_matches_schedule() {
        let registry: DebtRegistry = [
            DebtEntry::new("A", dec!(1000), dec!(0.12), dec!(50)),
            DebtEntry::new("B", dec!(500), dec!(0.24), dec!(30)),
        ]
        .into_iter()
        .collect();
        let schedule = Simulator::new(SimulationConfig::new(dec!(40), 120))
            .plan(&registry, PayoffPolicy::Avalanche)
            .unwrap();
        let summary = Summary::from_schedule(&schedule);

        let manual: Decimal = schedule
            .months()
            .iter()
            .flat_map(|m| m.records.iter())
            .map(|r| r.interest_accrued)
            .sum();
        assert!((summary.total_interest_paid - manual).abs() < dec!(0.000001));
        assert!(summary.months_to_payoff.is_reached());

        // Everything paid is principal plus interest.
        let principal = summary.total_amount_paid - summary.total_interest_paid;
        assert!((principal - registry.total_balance()).abs() < dec!(0.000001));
        assert!(summary.interest_share() > 0.0);
    }

    #[test]
    fn test_per_debt_payoff_months() {
        let registry: DebtRegistry = [
            DebtEntry::new("Large", dec!(300), dec!(0), dec!(100)),
            DebtEntry::new("Small", dec!(50), dec!(0), dec!(50)),
        ]
        .into_iter()
        .collect();
        let summary = summarize(&registry, Decimal::ZERO, 10);

        // Small clears in month 1; Large then gets 150/month: 200 -> 50 -> 0.
        assert_eq!(summary.payoff_of(DebtId::new(1)), Some(PayoffMonth::Month(1)));
        assert_eq!(summary.payoff_of(DebtId::new(0)), Some(PayoffMonth::Month(3)));
        assert_eq!(summary.months_to_payoff, PayoffMonth::Month(3));
        assert_eq!(summary.payoff_of(DebtId::new(7)), None);
    }

    #[test]
    fn test_interest_share_value() {
        let summary = Summary {
            policy: PayoffPolicy::Avalanche,
            months_to_payoff: PayoffMonth::Month(4),
            total_interest_paid: dec!(25),
            total_amount_paid: dec!(200),
            debt_payoffs: Vec::new(),
        };
        assert_abs_diff_eq!(summary.interest_share(), 0.125, epsilon = 1e-9);
    }

    #[test]
    fn test_display_shows_headline_figures_only() {
        let summary = Summary {
            policy: PayoffPolicy::Snowball,
            months_to_payoff: PayoffMonth::Month(3),
            total_interest_paid: dec!(12.345),
            total_amount_paid: dec!(512.345),
            debt_payoffs: vec![
                DebtPayoff {
                    debt: DebtId::new(0),
                    payoff: PayoffMonth::Month(3),
                },
                DebtPayoff {
                    debt: DebtId::new(1),
                    payoff: PayoffMonth::Month(1),
                },
            ],
        };
        let text = summary.to_string();
        assert!(text.starts_with("=== Snowball Plan ==="));
        assert!(text.contains("Total Interest:  12.34"));
        assert!(!text.contains("#0"));
        assert!(!text.contains("#1"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_payoff_month_display() {
        assert_eq!(PayoffMonth::Month(7).to_string(), "7 months");
        assert_eq!(
            PayoffMonth::NotReached { horizon: 120 }.to_string(),
            "not reached within 120 months"
        );
    }
}
