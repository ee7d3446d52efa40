use crate::core::debt::{DebtId, DebtRegistry};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline figures for a set of debts before any simulation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub debt_count: usize,
    pub total_balance: Decimal,
    pub total_min_payment: Decimal,
    /// Balance-weighted APR across all debts.
    pub weighted_average_rate: Decimal,
    /// What leaves the payer's account each month: minimums plus extra.
    pub monthly_outlay: Decimal,
    /// Highest APR debt; the first entered wins a tie.
    pub highest_rate_debt: Option<DebtId>,
}

impl PortfolioSnapshot {
    pub fn from_registry(registry: &DebtRegistry, extra_payment: Decimal) -> Self {
        let total_balance = registry.total_balance();
        let total_min_payment = registry.total_min_payment();

        let weighted_average_rate = if total_balance == Decimal::ZERO {
            Decimal::ZERO
        } else {
            let weighted = registry
                .debts()
                .iter()
                .fold(Decimal::ZERO, |acc, d| {
                    acc.saturating_add(d.balance() * d.annual_rate())
                });
            weighted / total_balance
        };

        let mut highest: Option<(DebtId, Decimal)> = None;
        for debt in registry.debts() {
            match highest {
                Some((_, rate)) if debt.annual_rate() <= rate => {}
                _ => highest = Some((debt.id(), debt.annual_rate())),
            }
        }

        PortfolioSnapshot {
            debt_count: registry.len(),
            total_balance,
            total_min_payment,
            weighted_average_rate,
            monthly_outlay: total_min_payment.saturating_add(extra_payment),
            highest_rate_debt: highest.map(|(id, _)| id),
        }
    }
}

impl std::fmt::Display for PortfolioSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Portfolio ===")?;
        writeln!(f, "Debts:               {}", self.debt_count)?;
        writeln!(f, "Total Debt:          {}", self.total_balance.round_dp(2))?;
        writeln!(f, "Total Minimums:      {}", self.total_min_payment.round_dp(2))?;
        writeln!(
            f,
            "Weighted Avg APR:    {}%",
            (self.weighted_average_rate * Decimal::from(100)).round_dp(2)
        )?;
        writeln!(f, "Monthly Outlay:      {}", self.monthly_outlay.round_dp(2))?;
        if let Some(id) = self.highest_rate_debt {
            writeln!(f, "Highest APR Debt:    {}", id)?;
        }
        Ok(())
    }
}
