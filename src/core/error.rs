use crate::core::debt::DebtId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when caller-supplied inputs cannot be simulated.
///
/// Validation is all-or-nothing: the first offending input aborts the
/// whole batch before any ranking or schedule is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("debt {debt} ({name}) has a negative balance: {balance}")]
    NegativeBalance {
        debt: DebtId,
        name: String,
        balance: Decimal,
    },
    #[error("debt {debt} ({name}) has a negative minimum payment: {min_payment}")]
    NegativeMinPayment {
        debt: DebtId,
        name: String,
        min_payment: Decimal,
    },
    #[error("debt {debt} ({name}) has an annual rate outside [0, 1]: {rate}")]
    RateOutOfRange {
        debt: DebtId,
        name: String,
        rate: Decimal,
    },
    #[error("extra payment must not be negative, got {extra_payment}")]
    NegativeExtraPayment { extra_payment: Decimal },
    #[error("horizon must be at least one month")]
    ZeroHorizon,
    #[error("tie tolerance must not be negative, got {tolerance}")]
    NegativeTieTolerance { tolerance: Decimal },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages_name_the_debt() {
        let err = ValidationError::RateOutOfRange {
            debt: DebtId::new(2),
            name: "Store Card".to_string(),
            rate: dec!(1.5),
        };
        let msg = err.to_string();
        assert!(msg.contains("#2"));
        assert!(msg.contains("Store Card"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn test_zero_horizon_message() {
        assert_eq!(
            ValidationError::ZeroHorizon.to_string(),
            "horizon must be at least one month"
        );
    }
}
