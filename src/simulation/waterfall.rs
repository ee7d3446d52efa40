//! Single-month payment cascade.
//!
//! Budget flows strictly in rank order: each debt takes its minimum plus
//! whatever the previous rank left over, and hands the remainder down.
//! This is a left-to-right reduction with one accumulator and cannot be
//! reordered without changing the result.

use crate::core::config::FreedMinimumRouting;
use crate::core::debt::Debt;
use crate::simulation::schedule::MonthRecord;
use rust_decimal::Decimal;

/// A debt and the balance it carries into the month.
#[derive(Debug, Clone, Copy)]
pub struct Slot<'a> {
    pub debt: &'a Debt,
    pub balance: Decimal,
}

impl<'a> Slot<'a> {
    pub fn new(debt: &'a Debt, balance: Decimal) -> Self {
        Self { debt, balance }
    }

    pub fn is_retired(&self) -> bool {
        self.balance <= Decimal::ZERO
    }
}

/// Result of cascading one month's budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeOutcome {
    /// One record per slot, in the order the slots were given.
    pub records: Vec<MonthRecord>,
    /// Budget still unallocated after the last rank.
    pub unspent: Decimal,
}

/// Cascade `extra_payment` and every minimum payment down `slots`.
///
/// `slots` must already be in rank order. For every active debt:
///
/// ```text
/// interest  = balance * rate / 12
/// available = min_payment + carried budget
/// payment   = min(balance + interest, available)
/// carried'  = available - payment
/// ending    = max(0, balance + interest - payment)
/// ```
///
/// Retired debts pay nothing; where their minimum goes depends on `routing`.
/// `payments + unspent == extra_payment + sum(min_payment)` always holds.
///
/// A balance that would exceed `Decimal::MAX` is pinned there and only the
/// interest that fits is recorded, so a runaway debt never overflows.
pub fn cascade(
    slots: &[Slot<'_>],
    extra_payment: Decimal,
    routing: FreedMinimumRouting,
) -> CascadeOutcome {
    let mut available = extra_payment;
    if routing == FreedMinimumRouting::FirstInRank {
        available = slots
            .iter()
            .filter(|s| s.is_retired())
            .fold(available, |acc, s| acc.saturating_add(s.debt.min_payment()));
    }

    let mut records = Vec::with_capacity(slots.len());
    for slot in slots {
        let debt = slot.debt;

        if slot.is_retired() {
            records.push(MonthRecord::retired(debt.id()));
            if routing == FreedMinimumRouting::NextInRank {
                available = available.saturating_add(debt.min_payment());
            }
            continue;
        }

        let interest = debt.monthly_interest(slot.balance);
        let (interest, owed) = match slot.balance.checked_add(interest) {
            Some(owed) => (interest, owed),
            None => (Decimal::MAX - slot.balance, Decimal::MAX),
        };
        let budget = debt.min_payment().saturating_add(available);
        let payment = owed.min(budget);
        let ending = (owed - payment).max(Decimal::ZERO);

        records.push(MonthRecord {
            debt: debt.id(),
            opening_balance: slot.balance,
            interest_accrued: interest,
            payment_made: payment,
            ending_balance: ending,
        });

        // Non-zero only when this debt was cleared with budget to spare.
        available = budget - payment;
    }

    CascadeOutcome {
        records,
        unspent: available,
    }
}
