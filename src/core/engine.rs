//! Billing engine
//!
//! This module provides the BillingEngine that applies user actions by
//! coordinating the AccountStore with the billing and payment calculators.
//!
//! Every action is all-or-nothing:
//! - The account is looked up (missing ids fail with `AccountNotFound`)
//! - The calculator runs against the stored record and returns a quote
//! - An updated copy is built from the quote
//! - Only then is the copy swapped into the store
//!
//! A failure at any step leaves the store exactly as it was.

use crate::core::account_store::AccountStore;
use crate::core::billing::{apply_bill, compute_bill, BillQuote};
use crate::core::documents::{Receipt, Slip, Statement};
use crate::core::payment::{apply_payment, record_payment, PaymentQuote};
use crate::core::query::{query, AccountQuery, QueryPage};
use crate::core::traits::{Clock, SystemClock};
use crate::types::{Account, AccountId, ActionRecord, BillingError, RateTable, ServiceType};
use rust_decimal::Decimal;
use tracing::info;

/// What an applied action produced
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Registered { account_id: AccountId },
    Billed { quote: BillQuote, slip: Slip },
    Paid { quote: PaymentQuote, slip: Slip },
    Statement { slip: Slip },
}

impl ActionOutcome {
    /// Document produced by the action, if any
    pub fn slip(&self) -> Option<&Slip> {
        match self {
            ActionOutcome::Registered { .. } => None,
            ActionOutcome::Billed { slip, .. }
            | ActionOutcome::Paid { slip, .. }
            | ActionOutcome::Statement { slip } => Some(slip),
        }
    }
}

/// Applies registrations, readings and payments to an account store
pub struct BillingEngine<C: Clock = SystemClock> {
    store: AccountStore,
    rates: RateTable,
    clock: C,
}

impl<C: Clock> BillingEngine<C> {
    pub fn new(store: AccountStore, rates: RateTable, clock: C) -> Self {
        BillingEngine {
            store,
            rates,
            clock,
        }
    }

    /// Apply a single action record
    ///
    /// Routes the record to the matching handler.
    pub fn process(&mut self, record: ActionRecord) -> Result<ActionOutcome, BillingError> {
        match record {
            ActionRecord::Register { name, service_type } => {
                let account_id = self.register(&name, service_type)?;
                Ok(ActionOutcome::Registered { account_id })
            }
            ActionRecord::Reading { account, reading } => {
                let (quote, statement) = self.generate_bill(account, reading)?;
                Ok(ActionOutcome::Billed {
                    quote,
                    slip: Slip::Statement(statement),
                })
            }
            ActionRecord::Payment { account, amount } => {
                let (quote, receipt) = self.process_payment(account, amount)?;
                Ok(ActionOutcome::Paid {
                    quote,
                    slip: Slip::Receipt(receipt),
                })
            }
            ActionRecord::Statement { account } => Ok(ActionOutcome::Statement {
                slip: Slip::Statement(self.statement(account)?),
            }),
        }
    }

    /// Register a new customer
    ///
    /// # Errors
    ///
    /// - `EmptyName` if the name is blank
    /// - `ArithmeticOverflow` if no id is left
    pub fn register(
        &mut self,
        name: &str,
        service_type: ServiceType,
    ) -> Result<AccountId, BillingError> {
        let account = self.store.create(name, service_type)?;
        info!(
            account_id = account.id,
            name = %account.name,
            service = %account.service_type,
            "account registered"
        );
        Ok(account.id)
    }

    /// Record a meter reading and bill the account
    ///
    /// # Returns
    ///
    /// The priced bill and the statement for the updated account.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no account has this id
    /// - `ReadingRegression` if the reading is lower than the one on record
    /// - `ArithmeticOverflow` if the bill cannot be represented
    pub fn generate_bill(
        &mut self,
        id: AccountId,
        new_reading: Decimal,
    ) -> Result<(BillQuote, Statement), BillingError> {
        let account = self.store.get(id)?;
        let quote = compute_bill(account, new_reading, &self.rates)?;

        let now = self.clock.now();
        let unit = &self.rates.get(account.service_type).unit;
        let updated = apply_bill(account, &quote, unit, now)?;
        let statement = Statement::for_account(&updated, &self.rates, Some(quote.usage), now);

        self.commit(updated)?;
        info!(
            account_id = id,
            usage = %quote.usage,
            total_bill = %quote.total_bill,
            balance = %statement.total_due,
            "bill generated"
        );

        Ok((quote, statement))
    }

    /// Record a payment against an account
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no account has this id
    /// - `NonPositivePayment` if the amount is zero or negative
    /// - `ArithmeticOverflow` if the balance cannot be represented
    pub fn process_payment(
        &mut self,
        id: AccountId,
        amount: Decimal,
    ) -> Result<(PaymentQuote, Receipt), BillingError> {
        let account = self.store.get(id)?;
        let quote = apply_payment(account, amount)?;

        let now = self.clock.now();
        let updated = record_payment(account, &quote, now);
        let receipt = Receipt::for_account(&updated, amount, now);

        self.commit(updated)?;
        info!(
            account_id = id,
            amount = %amount,
            balance = %quote.new_balance,
            "payment recorded"
        );

        Ok((quote, receipt))
    }

    /// Current statement for an account, without changing it
    pub fn statement(&self, id: AccountId) -> Result<Statement, BillingError> {
        let account = self.store.get(id)?;
        Ok(Statement::for_account(
            account,
            &self.rates,
            None,
            self.clock.now(),
        ))
    }

    /// Run a dashboard query over the store
    pub fn query(&self, account_query: &AccountQuery) -> QueryPage<'_> {
        query(self.store.accounts(), account_query)
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    fn commit(&mut self, updated: Account) -> Result<(), BillingError> {
        let id = updated.id;
        if self.store.replace(id, updated) {
            Ok(())
        } else {
            Err(BillingError::account_not_found(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::account_store::{demo_accounts, DEFAULT_BASE_ID};
    use crate::core::query::ServiceFilter;
    use crate::core::traits::FixedClock;
    use crate::types::TransactionKind;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn demo_engine() -> BillingEngine<FixedClock> {
        let store = AccountStore::with_accounts(DEFAULT_BASE_ID, demo_accounts(date())).unwrap();
        BillingEngine::new(store, RateTable::standard(), FixedClock(date()))
    }

    fn empty_engine() -> BillingEngine<FixedClock> {
        BillingEngine::new(
            AccountStore::new(DEFAULT_BASE_ID),
            RateTable::standard(),
            FixedClock(date()),
        )
    }

    fn snapshot(engine: &BillingEngine<FixedClock>) -> Vec<Account> {
        engine.store().accounts().to_vec()
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut engine = empty_engine();

        assert_eq!(engine.register("Alice", ServiceType::Water).unwrap(), 101);
        assert_eq!(engine.register("Bob", ServiceType::Internet).unwrap(), 102);
        assert_eq!(engine.store().len(), 2);
    }

    #[test]
    fn test_generate_bill_updates_account() {
        let mut engine = demo_engine();

        let (quote, statement) = engine.generate_bill(101, dec!(271)).unwrap();

        assert_eq!(quote.usage, dec!(40));
        assert_eq!(quote.cost, dec!(6.00));
        assert_eq!(quote.total_bill, dec!(16.00));
        assert_eq!(statement.total_due, dec!(60.65));
        assert_eq!(statement.usage, Some(dec!(40)));
        assert_eq!(statement.unit, "kWh");

        let account = engine.store().find_by_id(101).unwrap();
        assert_eq!(account.balance, dec!(60.65));
        assert_eq!(account.last_reading, dec!(271));
        assert_eq!(account.history[0].date, date());
        assert_eq!(account.history_total(), account.balance);
    }

    #[test]
    fn test_regression_leaves_store_unchanged() {
        let mut engine = demo_engine();
        let before = snapshot(&engine);

        let err = engine.generate_bill(101, dec!(200)).unwrap_err();

        assert!(matches!(err, BillingError::ReadingRegression { .. }));
        assert_eq!(snapshot(&engine), before);
    }

    #[test]
    fn test_payment_clears_balance() {
        let mut engine = demo_engine();

        let (quote, receipt) = engine.process_payment(102, dec!(45.50)).unwrap();

        assert_eq!(quote.new_balance, dec!(0.00));
        assert_eq!(receipt.amount_paid, dec!(45.50));
        assert_eq!(receipt.new_balance, dec!(0.00));

        let account = engine.store().find_by_id(102).unwrap();
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.history[0].kind, TransactionKind::Payment);
        assert_eq!(account.history[0].amount, dec!(-45.50));
    }

    #[test]
    fn test_unknown_account_is_reported() {
        let mut engine = demo_engine();
        let before = snapshot(&engine);

        assert_eq!(
            engine.generate_bill(999, dec!(10)).unwrap_err(),
            BillingError::AccountNotFound { id: 999 }
        );
        assert_eq!(
            engine.process_payment(999, dec!(10)).unwrap_err(),
            BillingError::AccountNotFound { id: 999 }
        );
        assert_eq!(
            engine.statement(999).unwrap_err(),
            BillingError::AccountNotFound { id: 999 }
        );
        assert_eq!(snapshot(&engine), before);
    }

    #[test]
    fn test_rejected_payment_leaves_store_unchanged() {
        let mut engine = demo_engine();
        let before = snapshot(&engine);

        let err = engine.process_payment(101, dec!(0)).unwrap_err();

        assert!(matches!(err, BillingError::NonPositivePayment { .. }));
        assert_eq!(snapshot(&engine), before);
    }

    #[test]
    fn test_process_routes_records() {
        let mut engine = empty_engine();

        let outcome = engine
            .process(ActionRecord::Register {
                name: "Carol".to_string(),
                service_type: ServiceType::Electricity,
            })
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Registered { account_id: 101 });
        assert!(outcome.slip().is_none());

        let outcome = engine
            .process(ActionRecord::Reading {
                account: 101,
                reading: dec!(100),
            })
            .unwrap();
        let slip = outcome.slip().unwrap();
        assert_eq!(slip.title(), "STATEMENT");

        let outcome = engine
            .process(ActionRecord::Payment {
                account: 101,
                amount: dec!(30),
            })
            .unwrap();
        assert_eq!(outcome.slip().unwrap().title(), "RECEIPT");

        let outcome = engine
            .process(ActionRecord::Statement { account: 101 })
            .unwrap();
        match outcome {
            ActionOutcome::Statement {
                slip: Slip::Statement(statement),
            } => {
                assert_eq!(statement.total_due, dec!(-5.00));
                assert_eq!(statement.usage, None);
            }
            other => panic!("Expected statement, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_does_not_mutate() {
        let mut engine = demo_engine();
        let before = snapshot(&engine);
        engine.process(ActionRecord::Statement { account: 102 }).unwrap();
        assert_eq!(snapshot(&engine), before);
    }

    #[test]
    fn test_query_through_engine() {
        let engine = demo_engine();
        let page = engine.query(&AccountQuery {
            filter: ServiceFilter::Only(ServiceType::Water),
            search: "jane".to_string(),
            ..AccountQuery::default()
        });
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 102);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_balance_invariant_after_mixed_actions() {
        let mut engine = demo_engine();
        engine.generate_bill(101, dec!(300)).unwrap();
        engine.process_payment(101, dec!(20)).unwrap();
        let _ = engine.generate_bill(101, dec!(250));
        engine.generate_bill(101, dec!(300)).unwrap();
        engine.process_payment(102, dec!(100)).unwrap();

        for account in engine.store().accounts() {
            assert_eq!(account.history_total(), account.balance);
        }
    }
}
