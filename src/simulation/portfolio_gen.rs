//! Random debt portfolios for benchmarks and stress testing.

use crate::core::debt::{DebtEntry, DebtKind, DebtRegistry};
use rand::Rng;
use rust_decimal::Decimal;

const KINDS: [DebtKind; 6] = [
    DebtKind::CreditCard,
    DebtKind::StudentLoan,
    DebtKind::CarLoan,
    DebtKind::PersonalLoan,
    DebtKind::Medical,
    DebtKind::Mortgage,
];

/// Configuration for generating a random portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub debt_count: usize,
    pub min_balance: Decimal,
    pub max_balance: Decimal,
    /// Upper bound on APR; must lie in [0, 1].
    pub max_rate: Decimal,
    /// Minimum payment as a fraction of balance, before the interest floor.
    pub min_payment_ratio: Decimal,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            debt_count: 5,
            min_balance: Decimal::from(500),
            max_balance: Decimal::from(25_000),
            max_rate: Decimal::new(30, 2),
            min_payment_ratio: Decimal::new(2, 2),
        }
    }
}

/// Generate a random, valid portfolio.
///
/// Every minimum payment covers at least the first month's interest, so
/// minimums alone never let a balance grow.
pub fn generate_random_portfolio(config: &PortfolioConfig) -> DebtRegistry {
    let mut rng = rand::thread_rng();
    let min_f64: f64 = config.min_balance.to_string().parse().unwrap_or(500.0);
    let max_f64: f64 = config.max_balance.to_string().parse().unwrap_or(25_000.0);
    let rate_f64: f64 = config.max_rate.to_string().parse().unwrap_or(0.30);

    (0..config.debt_count)
        .map(|i| {
            let balance = if max_f64 > min_f64 {
                rng.gen_range(min_f64..max_f64)
            } else {
                min_f64
            };
            let balance = Decimal::from_f64_retain(balance)
                .unwrap_or(config.min_balance)
                .round_dp(2);

            let rate = Decimal::from_f64_retain(rng.gen_range(0.0..=rate_f64))
                .unwrap_or(Decimal::ZERO)
                .round_dp(4)
                .clamp(Decimal::ZERO, Decimal::ONE);

            let interest_floor = balance * rate / Decimal::from(12) + Decimal::ONE;
            let min_payment = (balance * config.min_payment_ratio)
                .max(interest_floor)
                .round_dp(2);

            DebtEntry::new(format!("DEBT-{:03}", i), balance, rate, min_payment)
                .with_kind(KINDS[rng.gen_range(0..KINDS.len())])
        })
        .collect()
}
