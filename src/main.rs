//! debt-payoff CLI
//!
//! Simulate debt payoff plans from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Summarize one ordering
//! debt-payoff simulate --input plan.json --policy avalanche
//!
//! # Compare snowball and avalanche side by side, as JSON
//! debt-payoff compare --input plan.json --format json
//!
//! # Month-by-month totals
//! debt-payoff schedule --input plan.json --policy snowball
//!
//! # Generate a random plan for testing
//! debt-payoff generate --debts 8 --output plan.json
//! ```

use debt_payoff_engine::analysis::comparison::{Comparison, ComparisonResult};
use debt_payoff_engine::analysis::summary::Summary;
use debt_payoff_engine::core::config::SimulationConfig;
use debt_payoff_engine::core::debt::{DebtEntry, DebtRegistry};
use debt_payoff_engine::core::portfolio::PortfolioSnapshot;
use debt_payoff_engine::simulation::portfolio_gen::{generate_random_portfolio, PortfolioConfig};
use debt_payoff_engine::simulation::simulator::Simulator;
use debt_payoff_engine::strategy::policy::PayoffPolicy;
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"debt-payoff — snowball vs. avalanche debt payoff simulator

USAGE:
    debt-payoff <COMMAND> [OPTIONS]

COMMANDS:
    simulate    Summarize the payoff plan for one ordering
    compare     Compare snowball and avalanche on the same debts
    schedule    Print month-by-month totals for one ordering
    generate    Generate a random plan file (for testing)
    help        Show this message

OPTIONS (simulate, compare, schedule):
    --input <FILE>      Path to JSON plan file
    --policy <POLICY>   snowball or avalanche (simulate, schedule; default: avalanche)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --debts <N>         Number of debts (default: 5)
    --output <FILE>     Write to file instead of stdout

ENVIRONMENT:
    RUST_LOG            Log level (default: warn)

EXAMPLES:
    debt-payoff simulate --input plan.json --policy snowball
    debt-payoff compare --input plan.json --format json
    debt-payoff generate --debts 10 --output plan.json"#
    );
}

/// JSON schema for an input plan: run settings plus the debt list.
#[derive(serde::Deserialize, serde::Serialize)]
struct PlanFile {
    #[serde(flatten)]
    settings: SimulationConfig,
    debts: Vec<DebtEntry>,
}

#[derive(serde::Serialize)]
struct DebtPayoffOutput {
    id: usize,
    name: String,
    payoff_month: Option<u32>,
}

/// JSON output schema for one run. Amounts are rounded to cents.
#[derive(serde::Serialize)]
struct SummaryOutput {
    policy: String,
    months_to_payoff: u32,
    payoff_reached: bool,
    total_interest_paid: String,
    total_amount_paid: String,
    interest_share_percent: f64,
    debts: Vec<DebtPayoffOutput>,
}

#[derive(serde::Serialize)]
struct ComparisonOutput {
    snowball: SummaryOutput,
    avalanche: SummaryOutput,
    interest_saved: String,
    months_difference: u32,
    total_paid_difference: String,
    best_months_to_payoff: u32,
    recommended: String,
    portfolio: PortfolioOutput,
}

#[derive(serde::Serialize)]
struct PortfolioOutput {
    debt_count: usize,
    total_balance: String,
    total_min_payment: String,
    weighted_average_rate: String,
    monthly_outlay: String,
}

#[derive(serde::Serialize)]
struct MonthOutput {
    month: u32,
    total_payment: String,
    total_interest: String,
    total_remaining_balance: String,
}

fn cents(amount: Decimal) -> String {
    amount.round_dp(2).to_string()
}

fn summary_output(summary: &Summary, registry: &DebtRegistry) -> SummaryOutput {
    SummaryOutput {
        policy: summary.policy.as_str().to_string(),
        months_to_payoff: summary.months_to_payoff.display_months(),
        payoff_reached: summary.months_to_payoff.is_reached(),
        total_interest_paid: cents(summary.total_interest_paid),
        total_amount_paid: cents(summary.total_amount_paid),
        interest_share_percent: summary.interest_share() * 100.0,
        debts: summary
            .debt_payoffs
            .iter()
            .map(|p| DebtPayoffOutput {
                id: p.debt.index(),
                name: registry
                    .get(p.debt)
                    .map(|d| d.name().to_string())
                    .unwrap_or_default(),
                payoff_month: p.payoff.month(),
            })
            .collect(),
    }
}

fn comparison_output(
    result: &ComparisonResult,
    registry: &DebtRegistry,
    portfolio: &PortfolioSnapshot,
) -> ComparisonOutput {
    ComparisonOutput {
        snowball: summary_output(&result.snowball, registry),
        avalanche: summary_output(&result.avalanche, registry),
        interest_saved: cents(result.interest_saved),
        months_difference: result.months_difference,
        total_paid_difference: cents(result.total_paid_difference),
        best_months_to_payoff: result.best_months_to_payoff,
        recommended: result.recommended.to_string(),
        portfolio: PortfolioOutput {
            debt_count: portfolio.debt_count,
            total_balance: cents(portfolio.total_balance),
            total_min_payment: cents(portfolio.total_min_payment),
            weighted_average_rate: portfolio.weighted_average_rate.round_dp(6).to_string(),
            monthly_outlay: cents(portfolio.monthly_outlay),
        },
    }
}

fn load_plan(path: &str) -> (DebtRegistry, SimulationConfig) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let plan: PlanFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "extra_payment": "200",
  "horizon": 120,
  "debts": [
    {{ "name": "Credit Card", "balance": "4500", "annual_rate": "0.2199", "min_payment": "90" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let registry: DebtRegistry = plan.debts.into_iter().collect();
    log::debug!("loaded {} debts from {}", registry.len(), path);
    (registry, plan.settings)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    })
}

#[derive(Default)]
struct Options {
    input: Option<String>,
    policy: Option<PayoffPolicy>,
    format: Option<String>,
    debts: Option<usize>,
    output: Option<String>,
}

impl Options {
    fn parse(args: &[String]) -> Self {
        let mut options = Options::default();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            i += 1;
            let value = args.get(i).cloned().unwrap_or_else(|| {
                eprintln!("{} requires a value", flag);
                process::exit(1);
            });
            match flag {
                "--input" => options.input = Some(value),
                "--policy" => {
                    options.policy = Some(value.parse().unwrap_or_else(|e| {
                        eprintln!("{}", e);
                        process::exit(1);
                    }));
                }
                "--format" => {
                    if value != "text" && value != "json" {
                        eprintln!("--format requires 'text' or 'json'");
                        process::exit(1);
                    }
                    options.format = Some(value);
                }
                "--debts" => {
                    options.debts = Some(value.parse().unwrap_or_else(|_| {
                        eprintln!("--debts requires a number");
                        process::exit(1);
                    }));
                }
                "--output" => options.output = Some(value),
                _ => {
                    eprintln!("Unknown option: {}", flag);
                    process::exit(1);
                }
            }
            i += 1;
        }
        options
    }

    fn input(&self) -> &str {
        self.input.as_deref().unwrap_or_else(|| {
            eprintln!("Error: --input <FILE> is required");
            process::exit(1);
        })
    }

    fn json(&self) -> bool {
        self.format.as_deref() == Some("json")
    }
}

fn cmd_simulate(args: &[String]) {
    let options = Options::parse(args);
    let (registry, config) = load_plan(options.input());
    let policy = options.policy.unwrap_or(PayoffPolicy::Avalanche);

    let schedule = Simulator::new(config)
        .plan(&registry, policy)
        .unwrap_or_else(|e| {
            eprintln!("Invalid plan: {}", e);
            process::exit(1);
        });
    let summary = Summary::from_schedule(&schedule);

    if options.json() {
        println!("{}", to_json(&summary_output(&summary, &registry)));
    } else {
        println!("{}", summary);
        for payoff in &summary.debt_payoffs {
            if let Some(debt) = registry.get(payoff.debt) {
                println!("  {:<24} {}", debt.name(), payoff.payoff);
            }
        }
    }
}

fn cmd_compare(args: &[String]) {
    let options = Options::parse(args);
    let (registry, config) = load_plan(options.input());

    let result = Comparison::run(&registry, &config).unwrap_or_else(|e| {
        eprintln!("Invalid plan: {}", e);
        process::exit(1);
    });
    let portfolio = PortfolioSnapshot::from_registry(&registry, config.extra_payment);

    if options.json() {
        println!("{}", to_json(&comparison_output(&result, &registry, &portfolio)));
    } else {
        println!("{}", portfolio);
        println!("{}", result);
    }
}

fn cmd_schedule(args: &[String]) {
    let options = Options::parse(args);
    let (registry, config) = load_plan(options.input());
    let policy = options.policy.unwrap_or(PayoffPolicy::Avalanche);

    let schedule = Simulator::new(config)
        .plan(&registry, policy)
        .unwrap_or_else(|e| {
            eprintln!("Invalid plan: {}", e);
            process::exit(1);
        });

    if options.json() {
        let rows: Vec<MonthOutput> = schedule
            .months()
            .iter()
            .map(|m| MonthOutput {
                month: m.month,
                total_payment: cents(m.totals.total_payment),
                total_interest: cents(m.totals.total_interest),
                total_remaining_balance: cents(m.totals.total_remaining_balance),
            })
            .collect();
        println!("{}", to_json(&rows));
    } else {
        println!("{} plan, {} months", policy, schedule.horizon());
        println!("{:>6}{:>16}{:>16}{:>18}", "Month", "Payment", "Interest", "Remaining");
        for m in schedule.months() {
            println!(
                "{:>6}{:>16}{:>16}{:>18}",
                m.month,
                cents(m.totals.total_payment),
                cents(m.totals.total_interest),
                cents(m.totals.total_remaining_balance)
            );
            if m.totals.total_remaining_balance <= Decimal::ZERO {
                break;
            }
        }
    }
}

fn cmd_generate(args: &[String]) {
    let options = Options::parse(args);
    let config = PortfolioConfig {
        debt_count: options.debts.unwrap_or(5),
        ..Default::default()
    };

    let registry = generate_random_portfolio(&config);
    let plan = PlanFile {
        settings: SimulationConfig::default(),
        debts: registry
            .debts()
            .iter()
            .map(|d| {
                DebtEntry::new(d.name(), d.balance(), d.annual_rate(), d.min_payment())
                    .with_kind(d.kind())
            })
            .collect(),
    };
    let json = to_json(&plan);

    if let Some(path) = options.output {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} debts → {}", registry.len(), path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simulate" => cmd_simulate(rest),
        "compare" => cmd_compare(rest),
        "schedule" => cmd_schedule(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
