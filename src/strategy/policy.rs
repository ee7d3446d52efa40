use crate::core::debt::{Debt, DebtId, DebtRegistry};
use crate::core::error::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Debt-elimination ordering.
///
/// Both policies share the same downstream simulation; they differ only in
/// which debt receives surplus budget first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffPolicy {
    /// Smallest balance first.
    Snowball,
    /// Highest annual rate first.
    Avalanche,
}

impl PayoffPolicy {
    pub const ALL: [PayoffPolicy; 2] = [PayoffPolicy::Snowball, PayoffPolicy::Avalanche];

    /// Priority comparison between two debts at the given balances.
    /// `Ordering::Less` means `a` is paid down before `b`.
    ///
    /// Ties always fall back to the original input index.
    pub fn compare(&self, a: &Debt, a_balance: Decimal, b: &Debt, b_balance: Decimal) -> Ordering {
        let primary = match self {
            PayoffPolicy::Snowball => a_balance.cmp(&b_balance),
            PayoffPolicy::Avalanche => b.annual_rate().cmp(&a.annual_rate()),
        };
        primary.then_with(|| a.id().cmp(&b.id()))
    }

    /// Validate the registry and rank its debts from their initial state.
    ///
    /// Rank 1 receives surplus and freed budget first. An invalid debt
    /// anywhere in the batch fails the whole ranking.
    pub fn rank(&self, registry: &DebtRegistry) -> Result<Ranking, ValidationError> {
        registry.validate()?;
        Ok(self.rank_validated(registry))
    }

    /// Rank a registry the caller has already validated.
    pub(crate) fn rank_validated(&self, registry: &DebtRegistry) -> Ranking {
        let mut ordered: Vec<&Debt> = registry.debts().iter().collect();
        ordered.sort_by(|a, b| self.compare(a, a.balance(), b, b.balance()));

        let debts: Vec<RankedDebt> = ordered
            .into_iter()
            .enumerate()
            .map(|(i, debt)| RankedDebt {
                rank: i + 1,
                debt: debt.clone(),
            })
            .collect();

        log::debug!(
            "{} ranking: {:?}",
            self,
            debts.iter().map(|r| r.debt.id().index()).collect::<Vec<_>>()
        );

        Ranking {
            policy: *self,
            debts,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffPolicy::Snowball => "snowball",
            PayoffPolicy::Avalanche => "avalanche",
        }
    }
}

impl fmt::Display for PayoffPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffPolicy::Snowball => f.write_str("Snowball"),
            PayoffPolicy::Avalanche => f.write_str("Avalanche"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payoff policy '{0}', expected 'snowball' or 'avalanche'")]
pub struct ParsePolicyError(String);

impl FromStr for PayoffPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "snowball" => Ok(PayoffPolicy::Snowball),
            "avalanche" => Ok(PayoffPolicy::Avalanche),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// A debt with its 1-based position in the priority order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDebt {
    pub rank: usize,
    pub debt: Debt,
}

/// The fixed priority order for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    policy: PayoffPolicy,
    debts: Vec<RankedDebt>,
}

impl Ranking {
    pub fn policy(&self) -> PayoffPolicy {
        self.policy
    }

    /// Debts in rank order, rank 1 first.
    pub fn debts(&self) -> &[RankedDebt] {
        &self.debts
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    /// Debt ids in rank order.
    pub fn order(&self) -> Vec<DebtId> {
        self.debts.iter().map(|r| r.debt.id()).collect()
    }

    pub fn rank_of(&self, id: DebtId) -> Option<usize> {
        self.debts.iter().find(|r| r.debt.id() == id).map(|r| r.rank)
    }
}
