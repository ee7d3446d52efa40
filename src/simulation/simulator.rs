use crate::core::config::{RankingMode, SimulationConfig};
use crate::core::debt::DebtRegistry;
use crate::core::error::ValidationError;
use crate::simulation::schedule::{MonthSchedule, MonthTotals, Schedule};
use crate::simulation::waterfall::{cascade, Slot};
use crate::strategy::policy::{PayoffPolicy, Ranking};
use rust_decimal::Decimal;

/// Upper bound on months reserved up front. Longer horizons grow the
/// schedule as months are simulated.
const MAX_PREALLOCATED_MONTHS: u32 = 1_200;

/// Month-by-month amortization of a ranked set of debts.
///
/// Months run strictly in sequence: each month's ending balances are the
/// next month's opening balances. The simulator always runs to the
/// configured horizon; retired debts simply produce all-zero records.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::core::config::SimulationConfig;
/// use debt_payoff_engine::core::debt::{DebtEntry, DebtRegistry};
/// use debt_payoff_engine::simulation::simulator::Simulator;
/// use debt_payoff_engine::strategy::policy::PayoffPolicy;
/// use rust_decimal_macros::dec;
///
/// let registry: DebtRegistry = [DebtEntry::new("Phone", dec!(100), dec!(0), dec!(100))]
///     .into_iter()
///     .collect();
///
/// let simulator = Simulator::new(SimulationConfig::new(dec!(0), 12));
/// let schedule = simulator.plan(&registry, PayoffPolicy::Snowball).unwrap();
///
/// assert_eq!(schedule.len(), 12);
/// assert_eq!(schedule.months()[0].totals.total_remaining_balance, dec!(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Validate the inputs, rank the debts under `policy` and simulate.
    ///
    /// Nothing is ranked or simulated unless every input is valid.
    pub fn plan(
        &self,
        registry: &DebtRegistry,
        policy: PayoffPolicy,
    ) -> Result<Schedule, ValidationError> {
        self.config.validate()?;
        let ranking = policy.rank(registry)?;
        Ok(self.run(&ranking))
    }

    /// Simulate an already ranked set of debts.
    ///
    /// Performs no validation: a horizon of zero yields an empty schedule.
    /// Use [`Simulator::plan`] for caller-supplied inputs.
    ///
    /// Never panics on valid inputs: a balance that compounds past the
    /// largest representable amount stays pinned there and the run reports
    /// the payoff as not reached.
    pub fn run(&self, ranking: &Ranking) -> Schedule {
        let policy = ranking.policy();
        let horizon = self.config.horizon;
        let extra = self.config.extra_payment;
        debug_assert!(extra >= Decimal::ZERO, "extra payment must be validated");

        let mut slots: Vec<Slot<'_>> = ranking
            .debts()
            .iter()
            .map(|r| Slot::new(&r.debt, r.debt.balance()))
            .collect();

        let mut months = Vec::with_capacity(horizon.min(MAX_PREALLOCATED_MONTHS) as usize);
        for month in 1..=horizon {
            if self.config.ranking == RankingMode::Dynamic {
                slots.sort_by(|a, b| policy.compare(a.debt, a.balance, b.debt, b.balance));
            }

            let outcome = cascade(&slots, extra, self.config.freed_minimums);

            for (slot, record) in slots.iter_mut().zip(&outcome.records) {
                if !slot.is_retired() && record.is_paid_off() {
                    log::debug!(
                        "{}: {} ({}) paid off in month {}",
                        policy,
                        slot.debt.id(),
                        slot.debt.name(),
                        month
                    );
                }
                slot.balance = record.ending_balance;
            }

            let mut records = outcome.records;
            records.sort_by_key(|r| r.debt);
            let totals = MonthTotals::from_records(&records);

            log::trace!(
                "{} month {}: paid {}, interest {}, remaining {}",
                policy,
                month,
                totals.total_payment,
                totals.total_interest,
                totals.total_remaining_balance
            );

            months.push(MonthSchedule {
                month,
                records,
                totals,
            });
        }

        if let Some(last) = months.last() {
            if last.totals.total_remaining_balance > Decimal::ZERO {
                log::warn!(
                    "{} plan still owes {} after {} months",
                    policy,
                    last.totals.total_remaining_balance.round_dp(2),
                    horizon
                );
            }
        }

        Schedule::new(policy, horizon, ranking.order(), months)
    }
}
