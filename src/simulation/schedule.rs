use crate::core::debt::DebtId;
use crate::strategy::policy::PayoffPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What happened to one debt in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    pub debt: DebtId,
    /// Balance carried into the month.
    pub opening_balance: Decimal,
    pub interest_accrued: Decimal,
    pub payment_made: Decimal,
    /// Balance carried out of the month; the next month's opening balance.
    pub ending_balance: Decimal,
}

impl MonthRecord {
    /// Record for a debt that was already retired at the start of the month.
    pub fn retired(debt: DebtId) -> Self {
        Self {
            debt,
            opening_balance: Decimal::ZERO,
            interest_accrued: Decimal::ZERO,
            payment_made: Decimal::ZERO,
            ending_balance: Decimal::ZERO,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.ending_balance <= Decimal::ZERO
    }
}

/// Aggregate over all debts for one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthTotals {
    pub total_payment: Decimal,
    pub total_interest: Decimal,
    pub total_remaining_balance: Decimal,
}

impl MonthTotals {
    /// Sum the records, saturating at `Decimal::MAX`.
    pub fn from_records(records: &[MonthRecord]) -> Self {
        records.iter().fold(MonthTotals::default(), |acc, r| MonthTotals {
            total_payment: acc.total_payment.saturating_add(r.payment_made),
            total_interest: acc.total_interest.saturating_add(r.interest_accrued),
            total_remaining_balance: acc
                .total_remaining_balance
                .saturating_add(r.ending_balance),
        })
    }
}

/// One simulated month: a record per debt (in input order) plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSchedule {
    /// 1-based month index.
    pub month: u32,
    pub records: Vec<MonthRecord>,
    pub totals: MonthTotals,
}

impl MonthSchedule {
    pub fn record(&self, debt: DebtId) -> Option<&MonthRecord> {
        self.records.iter().find(|r| r.debt == debt)
    }
}

/// The full month-by-month payoff plan produced by one simulation run.
///
/// Never mutated after the simulator hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    policy: PayoffPolicy,
    horizon: u32,
    /// Debt ids in the rank order the run started with.
    order: Vec<DebtId>,
    months: Vec<MonthSchedule>,
}

impl Schedule {
    pub(crate) fn new(
        policy: PayoffPolicy,
        horizon: u32,
        order: Vec<DebtId>,
        months: Vec<MonthSchedule>,
    ) -> Self {
        Self {
            policy,
            horizon,
            order,
            months,
        }
    }

    pub fn policy(&self) -> PayoffPolicy {
        self.policy
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Rank order the run started with.
    pub fn order(&self) -> &[DebtId] {
        &self.order
    }

    pub fn months(&self) -> &[MonthSchedule] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// The given 1-based month, if simulated.
    pub fn month(&self, month: u32) -> Option<&MonthSchedule> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.months.get(index)
    }

    /// Ending balance of one debt for each month, in month order.
    pub fn balance_history(&self, debt: DebtId) -> Vec<Decimal> {
        self.months
            .iter()
            .filter_map(|m| m.record(debt))
            .map(|r| r.ending_balance)
            .collect()
    }

    /// Iterate over per-month totals.
    pub fn totals(&self) -> impl Iterator<Item = &MonthTotals> {
        self.months.iter().map(|m| &m.totals)
    }
}
