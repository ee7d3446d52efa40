use debt_payoff_engine::analysis::comparison::Comparison;
use debt_payoff_engine::analysis::summary::Summary;
use debt_payoff_engine::core::config::{FreedMinimumRouting, RankingMode, SimulationConfig};
use debt_payoff_engine::core::debt::{DebtEntry, DebtRegistry};
use debt_payoff_engine::simulation::simulator::Simulator;
use debt_payoff_engine::strategy::policy::PayoffPolicy;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Slack for rounding at Decimal's 28 significant digits.
const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 12);

/// Balance in cents, 0 to 50,000.00.
fn arb_balance() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// APR in basis points, 0% to 100%.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|bp| Decimal::new(bp, 4))
}

/// Any valid debt, including ones whose minimum never covers interest.
fn arb_debt() -> impl Strategy<Value = DebtEntry> {
    (arb_balance(), arb_rate(), 0i64..200_000i64).prop_map(|(balance, rate, min_cents)| {
        DebtEntry::new("DEBT", balance, rate, Decimal::new(min_cents, 2))
    })
}

/// A debt whose minimum covers its first month of interest, so balances
/// can only shrink.
fn arb_amortizing_debt() -> impl Strategy<Value = DebtEntry> {
    (arb_balance(), arb_rate(), 0i64..50_000i64).prop_map(|(balance, rate, cushion_cents)| {
        let interest = (balance * rate / Decimal::from(12)).ceil();
        DebtEntry::new("DEBT", balance, rate, interest + Decimal::new(cushion_cents, 2))
    })
}

fn arb_registry(debt: impl Strategy<Value = DebtEntry>) -> impl Strategy<Value = DebtRegistry> {
    prop::collection::vec(debt, 0..8).prop_map(|entries| entries.into_iter().collect())
}

fn arb_policy() -> impl Strategy<Value = PayoffPolicy> {
    prop::sample::select(PayoffPolicy::ALL.to_vec())
}

fn arb_config() -> impl Strategy<Value = SimulationConfig> {
    (
        0i64..100_000i64,
        1u32..48u32,
        prop::sample::select(vec![RankingMode::Static, RankingMode::Dynamic]),
        prop::sample::select(vec![
            FreedMinimumRouting::NextInRank,
            FreedMinimumRouting::FirstInRank,
        ]),
    )
        .prop_map(|(extra_cents, horizon, ranking, routing)| {
            SimulationConfig::new(Decimal::new(extra_cents, 2), horizon)
                .with_ranking(ranking)
                .with_freed_minimums(routing)
        })
}

proptest! {
    // ===================================================================
    // Conservation: a month never spends more than the minimums of every
    // debt plus the extra payment.
    // ===================================================================
    #[test]
    fn monthly_spend_is_bounded(
        registry in arb_registry(arb_debt()),
        config in arb_config(),
        policy in arb_policy(),
    ) {
        let schedule = Simulator::new(config.clone()).plan(&registry, policy).unwrap();
        let budget = registry.total_min_payment() + config.extra_payment;
        for month in schedule.months() {
            let freed: Decimal = month
                .records
                .iter()
                .filter(|r| r.opening_balance <= Decimal::ZERO)
                .filter_map(|r| registry.get(r.debt))
                .map(|d| d.min_payment())
                .sum();
            let paid: Decimal = month.records.iter().map(|r| r.payment_made).sum();
            prop_assert!(
                paid <= budget + EPSILON,
                "month {} paid {} of {}",
                month.month,
                paid,
                budget
            );
            prop_assert!(paid <= budget + freed + EPSILON);
        }
    }

    // ===================================================================
    // Non-negativity: no balance, payment or interest is ever negative.
    // ===================================================================
    #[test]
    fn balances_never_negative(
        registry in arb_registry(arb_debt()),
        config in arb_config(),
        policy in arb_policy(),
    ) {
        let schedule = Simulator::new(config).plan(&registry, policy).unwrap();
        for month in schedule.months() {
            for r in &month.records {
                prop_assert!(r.ending_balance >= Decimal::ZERO);
                prop_assert!(r.payment_made >= Decimal::ZERO);
                prop_assert!(r.interest_accrued >= Decimal::ZERO);
                prop_assert!(r.payment_made <= r.opening_balance + r.interest_accrued);
            }
        }
    }

    // ===================================================================
    // Absorption: once a debt reaches zero it stays at zero.
    // ===================================================================
    #[test]
    fn paid_off_debts_stay_paid(
        registry in arb_registry(arb_debt()),
        config in arb_config(),
        policy in arb_policy(),
    ) {
        let schedule = Simulator::new(config).plan(&registry, policy).unwrap();
        for debt in registry.debts() {
            let history = schedule.balance_history(debt.id());
            if let Some(first_zero) = history.iter().position(|b| *b == Decimal::ZERO) {
                prop_assert!(history[first_zero..].iter().all(|b| *b == Decimal::ZERO));
            }
        }
    }

    // ===================================================================
    // Monotonicity: when minimums cover interest, balances never grow.
    // ===================================================================
    #[test]
    fn amortizing_balances_never_grow(
        registry in arb_registry(arb_amortizing_debt()),
        config in arb_config(),
        policy in arb_policy(),
    ) {
        let schedule = Simulator::new(config).plan(&registry, policy).unwrap();
        for debt in registry.debts() {
            let mut previous = debt.balance();
            for balance in schedule.balance_history(debt.id()) {
                prop_assert!(balance <= previous);
                previous = balance;
            }
        }
    }

    // ===================================================================
    // Continuity: each month opens where the previous month ended.
    // ===================================================================
    #[test]
    fn months_chain_together(
        registry in arb_registry(arb_debt()),
        config in arb_config(),
        policy in arb_policy(),
    ) {
        let schedule = Simulator::new(config).plan(&registry, policy).unwrap();
        if let Some(first) = schedule.months().first() {
            for r in &first.records {
                prop_assert_eq!(r.opening_balance, registry.get(r.debt).unwrap().balance());
            }
        }
        for pair in schedule.months().windows(2) {
            for r in &pair[1].records {
                prop_assert_eq!(r.opening_balance, pair[0].record(r.debt).unwrap().ending_balance);
            }
        }
    }

    // ===================================================================
    // Determinism: identical inputs give identical schedules.
    // ===================================================================
    #[test]
    fn simulation_is_deterministic(
        registry in arb_registry(arb_debt()),
        config in arb_config(),
        policy in arb_policy(),
    ) {
        let simulator = Simulator::new(config);
        let first = simulator.plan(&registry, policy).unwrap();
        let second = simulator.plan(&registry, policy).unwrap();
        prop_assert_eq!(first, second);
    }

    // ===================================================================
    // Aggregation: summary totals are exact sums over the schedule.
    // ===================================================================
    #[test]
    fn summary_matches_schedule(
        registry in arb_registry(arb_debt()),
        config in arb_config(),
        policy in arb_policy(),
    ) {
        let schedule = Simulator::new(config).plan(&registry, policy).unwrap();
        let summary = Summary::from_schedule(&schedule);

        let interest: Decimal = schedule.totals().map(|t| t.total_interest).sum();
        let paid: Decimal = schedule.totals().map(|t| t.total_payment).sum();
        prop_assert_eq!(summary.total_interest_paid, interest);
        prop_assert_eq!(summary.total_amount_paid, paid);

        match summary.months_to_payoff.month() {
            Some(m) => {
                let month = schedule.month(m).unwrap();
                prop_assert!(month.totals.total_remaining_balance <= Decimal::ZERO);
                for earlier in &schedule.months()[..(m as usize - 1)] {
                    prop_assert!(earlier.totals.total_remaining_balance > Decimal::ZERO);
                }
            }
            None => {
                prop_assert!(schedule
                    .totals()
                    .all(|t| t.total_remaining_balance > Decimal::ZERO));
                prop_assert!(summary.months_to_payoff.display_months() == schedule.horizon());
            }
        }
    }

    // ===================================================================
    // Ranking: ranks are 1..N and follow the policy's ordering.
    // ===================================================================
    #[test]
    fn ranking_respects_policy(
        registry in arb_registry(arb_debt()),
        policy in arb_policy(),
    ) {
        let ranking = policy.rank(&registry).unwrap();
        prop_assert_eq!(ranking.len(), registry.len());
        for (i, ranked) in ranking.debts().iter().enumerate() {
            prop_assert_eq!(ranked.rank, i + 1);
        }
        for pair in ranking.debts().windows(2) {
            let (a, b) = (&pair[0].debt, &pair[1].debt);
            match policy {
                PayoffPolicy::Snowball => {
                    prop_assert!(a.balance() < b.balance()
                        || (a.balance() == b.balance() && a.id() < b.id()));
                }
                PayoffPolicy::Avalanche => {
                    prop_assert!(a.annual_rate() > b.annual_rate()
                        || (a.annual_rate() == b.annual_rate() && a.id() < b.id()));
                }
            }
        }
    }

    // ===================================================================
    // Comparison consistency: interest saved equals the gap between
    // independently computed summaries.
    // ===================================================================
    #[test]
    fn comparison_matches_independent_runs(
        registry in arb_registry(arb_debt()),
        config in arb_config(),
    ) {
        let result = Comparison::run(&registry, &config).unwrap();
        let simulator = Simulator::new(config);
        let snowball = Summary::from_schedule(
            &simulator.plan(&registry, PayoffPolicy::Snowball).unwrap(),
        );
        let avalanche = Summary::from_schedule(
            &simulator.plan(&registry, PayoffPolicy::Avalanche).unwrap(),
        );

        prop_assert_eq!(
            result.interest_saved,
            (snowball.total_interest_paid - avalanche.total_interest_paid).abs()
        );
        prop_assert_eq!(
            result.months_difference,
            snowball
                .months_to_payoff
                .display_months()
                .abs_diff(avalanche.months_to_payoff.display_months())
        );
        prop_assert_eq!(&result.snowball, &snowball);
        prop_assert_eq!(&result.avalanche, &avalanche);
    }
}
