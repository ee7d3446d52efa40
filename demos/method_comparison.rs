//! Snowball vs Avalanche comparison.
//!
//! Runs both orderings on the same debts, with and without an extra
//! monthly payment, and prints the recommendation for each.

use debt_payoff_engine::analysis::comparison::Comparison;
use debt_payoff_engine::core::config::{FreedMinimumRouting, SimulationConfig};
use debt_payoff_engine::core::debt::{DebtEntry, DebtRegistry};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn household() -> DebtRegistry {
    [
        DebtEntry::new("Credit Card A", dec!(4_500), dec!(0.2199), dec!(90)),
        DebtEntry::new("Student Loan", dec!(12_000), dec!(0.055), dec!(150)),
        DebtEntry::new("Car Loan", dec!(8_500), dec!(0.069), dec!(250)),
        DebtEntry::new("Personal Loan", dec!(3_000), dec!(0.1099), dec!(75)),
        DebtEntry::new("Medical Bill", dec!(1_500), dec!(0), dec!(50)),
    ]
    .into_iter()
    .collect()
}

fn compare(title: &str, registry: &DebtRegistry, config: &SimulationConfig) {
    println!("━━━ {} ━━━\n", title);
    match Comparison::run(registry, config) {
        Ok(result) => println!("{}", result),
        Err(e) => eprintln!("comparison failed: {}", e),
    }
}

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  debt-payoff-engine: Method Comparison   ║");
    println!("╚══════════════════════════════════════════╝\n");

    let registry = household();

    compare(
        "Scenario 1: Minimums Only",
        &registry,
        &SimulationConfig::new(Decimal::ZERO, 120),
    );

    compare(
        "Scenario 2: $200 Extra Per Month",
        &registry,
        &SimulationConfig::new(dec!(200), 120),
    );

    // Freed minimums jump straight to the top-ranked debt.
    compare(
        "Scenario 3: $200 Extra, Freed Minimums to Rank 1",
        &registry,
        &SimulationConfig::new(dec!(200), 120)
            .with_freed_minimums(FreedMinimumRouting::FirstInRank),
    );

    // A high-rate balance that minimums barely dent.
    let mut stretched = household();
    stretched.add(DebtEntry::new("Store Card", dec!(9_000), dec!(0.2899), dec!(220)));
    compare(
        "Scenario 4: Added Store Card, 36-Month Horizon",
        &stretched,
        &SimulationConfig::new(dec!(100), 36),
    );
}
