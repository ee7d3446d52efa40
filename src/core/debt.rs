use crate::core::error::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a debt: its position in the caller's input order.
///
/// Ids are assigned by [`DebtRegistry`] and double as the tie-breaker for
/// both payoff orderings (the first-entered debt wins a tie).
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::core::debt::DebtId;
///
/// let first = DebtId::new(0);
/// let second = DebtId::new(1);
/// assert!(first < second);
/// assert_eq!(first.to_string(), "#0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtId(usize);

impl DebtId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The original input index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Category label carried alongside a debt. Informational only; it never
/// influences ranking or simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    CreditCard,
    StudentLoan,
    CarLoan,
    PersonalLoan,
    Medical,
    Mortgage,
    #[default]
    Other,
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DebtKind::CreditCard => "Credit Card",
            DebtKind::StudentLoan => "Student Loan",
            DebtKind::CarLoan => "Car Loan",
            DebtKind::PersonalLoan => "Personal Loan",
            DebtKind::Medical => "Medical",
            DebtKind::Mortgage => "Mortgage",
            DebtKind::Other => "Other",
        };
        f.write_str(label)
    }
}

/// One debt as entered by the caller, before an id is assigned.
///
/// This is the record the input layer produces; amounts deserialize from
/// either JSON strings or numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtEntry {
    pub name: String,
    pub balance: Decimal,
    /// Nominal APR as a fraction, e.g. `0.2199` for 21.99%.
    pub annual_rate: Decimal,
    pub min_payment: Decimal,
    #[serde(default)]
    pub kind: DebtKind,
}

impl DebtEntry {
    pub fn new(
        name: impl Into<String>,
        balance: Decimal,
        annual_rate: Decimal,
        min_payment: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            balance,
            annual_rate,
            min_payment,
            kind: DebtKind::Other,
        }
    }

    pub fn with_kind(mut self, kind: DebtKind) -> Self {
        self.kind = kind;
        self
    }
}

/// An immutable debt record.
///
/// The simulator never mutates a `Debt`; balances over time live in the
/// produced [`Schedule`](crate::simulation::schedule::Schedule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    id: DebtId,
    name: String,
    /// Balance at the start of the simulation.
    balance: Decimal,
    annual_rate: Decimal,
    min_payment: Decimal,
    kind: DebtKind,
}

impl Debt {
    fn from_entry(id: DebtId, entry: DebtEntry) -> Self {
        Self {
            id,
            name: entry.name,
            balance: entry.balance,
            annual_rate: entry.annual_rate,
            min_payment: entry.min_payment,
            kind: entry.kind,
        }
    }

    /// Check this debt against the input rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.balance < Decimal::ZERO {
            return Err(ValidationError::NegativeBalance {
                debt: self.id,
                name: self.name.clone(),
                balance: self.balance,
            });
        }
        if self.min_payment < Decimal::ZERO {
            return Err(ValidationError::NegativeMinPayment {
                debt: self.id,
                name: self.name.clone(),
                min_payment: self.min_payment,
            });
        }
        if self.annual_rate < Decimal::ZERO || self.annual_rate > Decimal::ONE {
            return Err(ValidationError::RateOutOfRange {
                debt: self.id,
                name: self.name.clone(),
                rate: self.annual_rate,
            });
        }
        Ok(())
    }

    /// Interest accrued in one month on `balance` at this debt's rate.
    pub fn monthly_interest(&self, balance: Decimal) -> Decimal {
        balance * self.annual_rate / Decimal::from(12)
    }

    // --- Accessors ---

    pub fn id(&self) -> DebtId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    pub fn min_payment(&self) -> Decimal {
        self.min_payment
    }

    pub fn kind(&self) -> DebtKind {
        self.kind
    }
}

/// The ordered list of debts submitted for simulation.
///
/// Ids are assigned in insertion order, so the registry is the single
/// source of the "original index" used to break ranking ties.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::core::debt::{DebtEntry, DebtRegistry};
/// use rust_decimal_macros::dec;
///
/// let mut registry = DebtRegistry::new();
/// let card = registry.add(DebtEntry::new("Card", dec!(4500), dec!(0.2199), dec!(90)));
///
/// assert_eq!(card.index(), 0);
/// assert_eq!(registry.total_balance(), dec!(4500));
/// assert!(registry.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtRegistry {
    debts: Vec<Debt>,
}

impl DebtRegistry {
    pub fn new() -> Self {
        Self { debts: Vec::new() }
    }

    /// Append a debt and return the id it was given.
    pub fn add(&mut self, entry: DebtEntry) -> DebtId {
        let id = DebtId::new(self.debts.len());
        self.debts.push(Debt::from_entry(id, entry));
        id
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn get(&self, id: DebtId) -> Option<&Debt> {
        self.debts.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    /// Validate every debt. The first failure rejects the whole batch.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.debts.iter().try_for_each(Debt::validate)
    }

    /// Sum of all initial balances, saturating at `Decimal::MAX`.
    pub fn total_balance(&self) -> Decimal {
        self.debts
            .iter()
            .fold(Decimal::ZERO, |acc, d| acc.saturating_add(d.balance()))
    }

    /// Sum of all minimum payments, saturating at `Decimal::MAX`.
    pub fn total_min_payment(&self) -> Decimal {
        self.debts
            .iter()
            .fold(Decimal::ZERO, |acc, d| acc.saturating_add(d.min_payment()))
    }
}

impl FromIterator<DebtEntry> for DebtRegistry {
    fn from_iter<T: IntoIterator<Item = DebtEntry>>(iter: T) -> Self {
        let mut registry = Self::new();
        for entry in iter {
            registry.add(entry);
        }
        registry
    }
}
