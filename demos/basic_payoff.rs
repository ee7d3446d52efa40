//! Basic payoff example.
//!
//! Walks a household's debts through a single Avalanche plan and shows
//! how the waterfall retires them one by one.

use debt_payoff_engine::analysis::summary::Summary;
use debt_payoff_engine::core::config::SimulationConfig;
use debt_payoff_engine::core::debt::{DebtEntry, DebtKind, DebtRegistry};
use debt_payoff_engine::core::portfolio::PortfolioSnapshot;
use debt_payoff_engine::simulation::simulator::Simulator;
use debt_payoff_engine::strategy::policy::PayoffPolicy;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  debt-payoff-engine: Basic Payoff Plan   ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut registry = DebtRegistry::new();
    registry.add(
        DebtEntry::new("Credit Card A", dec!(4_500), dec!(0.2199), dec!(90))
            .with_kind(DebtKind::CreditCard),
    );
    registry.add(
        DebtEntry::new("Student Loan", dec!(12_000), dec!(0.055), dec!(150))
            .with_kind(DebtKind::StudentLoan),
    );
    registry.add(
        DebtEntry::new("Car Loan", dec!(8_500), dec!(0.069), dec!(250))
            .with_kind(DebtKind::CarLoan),
    );
    registry.add(
        DebtEntry::new("Personal Loan", dec!(3_000), dec!(0.1099), dec!(75))
            .with_kind(DebtKind::PersonalLoan),
    );
    registry.add(
        DebtEntry::new("Medical Bill", dec!(1_500), dec!(0), dec!(50))
            .with_kind(DebtKind::Medical),
    );

    let config = SimulationConfig::new(dec!(200), 120);

    // --- Step 1: Portfolio overview ---
    println!("━━━ Step 1: Portfolio ━━━\n");
    println!("{}", PortfolioSnapshot::from_registry(&registry, config.extra_payment));

    // --- Step 2: Ranking ---
    println!("━━━ Step 2: Avalanche Ranking ━━━\n");
    let ranking = match PayoffPolicy::Avalanche.rank(&registry) {
        Ok(ranking) => ranking,
        Err(e) => {
            eprintln!("invalid debts: {}", e);
            return;
        }
    };
    for ranked in ranking.debts() {
        println!(
            "  {}. {:<15} {:>10}  @ {}%",
            ranked.rank,
            ranked.debt.name(),
            ranked.debt.balance(),
            ranked.debt.annual_rate() * dec!(100)
        );
    }
    println!();

    // --- Step 3: First months of the schedule ---
    println!("━━━ Step 3: First Six Months ━━━\n");
    let schedule = Simulator::new(config).run(&ranking);
    println!("  Month    Payment   Interest    Remaining");
    for month in schedule.months().iter().take(6) {
        println!(
            "  {:>5} {:>10} {:>10} {:>12}",
            month.month,
            month.totals.total_payment.round_dp(2),
            month.totals.total_interest.round_dp(2),
            month.totals.total_remaining_balance.round_dp(2)
        );
    }
    println!();

    // --- Step 4: Summary ---
    println!("━━━ Step 4: Summary ━━━\n");
    let summary = Summary::from_schedule(&schedule);
    println!("{}", summary);
    for payoff in &summary.debt_payoffs {
        if let Some(debt) = registry.get(payoff.debt) {
            println!("  {:<15} ({}) cleared: {}", debt.name(), debt.kind(), payoff.payoff);
        }
    }
}
