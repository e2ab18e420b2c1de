//! Payment processor
//!
//! Payments lower the balance by the amount received. Paying more than is
//! owed is allowed and leaves the account in credit (negative balance).
//! Zero and negative amounts are rejected.

use crate::types::{Account, BillingError, Transaction};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Description recorded on every payment entry
pub const PAYMENT_DESCRIPTION: &str = "Cash/Online Payment";

/// Result of pricing a payment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentQuote {
    /// Amount received
    pub amount: Decimal,

    /// balance - amount
    pub new_balance: Decimal,
}

/// Compute the balance after a payment
///
/// # Errors
///
/// - `NonPositivePayment` if `amount <= 0`
/// - `ArithmeticOverflow` if the balance cannot be represented
pub fn apply_payment(account: &Account, amount: Decimal) -> Result<PaymentQuote, BillingError> {
    if amount <= Decimal::ZERO {
        return Err(BillingError::non_positive_payment(account.id, amount));
    }

    let new_balance = account
        .balance
        .checked_sub(amount)
        .ok_or_else(|| BillingError::arithmetic_overflow("payment", account.id))?;

    Ok(PaymentQuote {
        amount,
        new_balance,
    })
}

/// Apply a payment quote to a copy of the account
///
/// The copy carries the new balance and a Payment entry of `-amount` at the
/// front of its history.
pub fn record_payment(account: &Account, quote: &PaymentQuote, date: DateTime<Utc>) -> Account {
    let mut updated = account.clone();
    updated.balance = quote.new_balance;
    updated.push_history(Transaction::payment(
        date,
        PAYMENT_DESCRIPTION,
        quote.amount,
    ));
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ServiceType, TransactionKind};
    use chrono::TimeZone;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn jane() -> Account {
        Account::with_opening_state(
            102,
            "Jane Smith",
            ServiceType::Water,
            dec!(45.50),
            dec!(120),
            date(),
        )
    }

    #[test]
    fn test_full_payment_clears_balance() {
        let account = jane();
        let quote = apply_payment(&account, dec!(45.50)).unwrap();
        assert_eq!(quote.new_balance, dec!(0.00));

        let updated = record_payment(&account, &quote, date());
        assert_eq!(updated.balance, Decimal::ZERO);
        assert_eq!(updated.history[0].kind, TransactionKind::Payment);
        assert_eq!(updated.history[0].amount, dec!(-45.50));
        assert_eq!(updated.history[0].description, PAYMENT_DESCRIPTION);
        assert_eq!(updated.history_total(), updated.balance);
    }

    #[rstest]
    #[case::partial(dec!(20.00), dec!(25.50))]
    #[case::overpayment(dec!(50.00), dec!(-4.50))]
    #[case::fractional(dec!(0.01), dec!(45.49))]
    fn test_balance_decreases_by_exact_amount(
        #[case] amount: Decimal,
        #[case] expected_balance: Decimal,
    ) {
        let account = jane();
        let quote = apply_payment(&account, amount).unwrap();
        assert_eq!(quote.new_balance, expected_balance);
        assert_eq!(account.balance - quote.new_balance, amount);
    }

    // Non-positive payments are rejected rather than treated as charges
    #[rstest]
    #[case::zero(dec!(0))]
    #[case::negative(dec!(-5))]
    fn test_non_positive_payment_rejected(#[case] amount: Decimal) {
        let account = jane();
        assert_eq!(
            apply_payment(&account, amount).unwrap_err(),
            BillingError::NonPositivePayment { id: 102, amount }
        );
    }

    #[test]
    fn test_payment_on_zero_balance_creates_credit() {
        let account = Account::new(1, "Prepay", ServiceType::Internet);
        let quote = apply_payment(&account, dec!(30)).unwrap();
        let updated = record_payment(&account, &quote, date());
        assert_eq!(updated.balance, dec!(-30));
        assert!(!updated.is_due());
    }
}
