//! Account store module
//!
//! This module provides the `AccountStore` struct which holds the
//! authoritative, insertion-ordered list of customer accounts.
//!
//! The AccountStore is responsible for:
//! - Assigning account ids on registration (max existing id + 1, or the base id)
//! - Looking accounts up by id
//! - Swapping in updated account records produced by the billing and payment
//!   calculators
//!
//! Accounts are never deleted and ids are never reassigned.

use crate::types::{Account, AccountId, BillingError, ServiceType};
use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;
use std::collections::HashSet;

/// Id given to the first account of an empty store
pub const DEFAULT_BASE_ID: AccountId = 101;

/// Holds all customer accounts in registration order
#[derive(Debug, Clone)]
pub struct AccountStore {
    /// Accounts in insertion order
    accounts: Vec<Account>,

    /// Id assigned when the store is empty
    base_id: AccountId,
}

impl AccountStore {
    /// Create an empty store that starts numbering at `base_id`
    pub fn new(base_id: AccountId) -> Self {
        AccountStore {
            accounts: Vec::new(),
            base_id,
        }
    }

    /// Create a store preloaded with existing accounts
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if two accounts share an id.
    pub fn with_accounts(base_id: AccountId, accounts: Vec<Account>) -> Result<Self, BillingError> {
        let mut seen = HashSet::with_capacity(accounts.len());
        for account in &accounts {
            if !seen.insert(account.id) {
                return Err(BillingError::config(format!(
                    "duplicate account id {}",
                    account.id
                )));
            }
        }

        Ok(AccountStore { accounts, base_id })
    }

    /// Id the next registration will receive
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` when the highest id is `AccountId::MAX`.
    pub fn next_id(&self) -> Result<AccountId, BillingError> {
        match self.accounts.iter().map(|account| account.id).max() {
            Some(max_id) => max_id
                .checked_add(1)
                .ok_or_else(|| BillingError::arithmetic_overflow("register", max_id)),
            None => Ok(self.base_id),
        }
    }

    /// Register a new account
    ///
    /// The name is trimmed; the account starts with zero balance, zero
    /// reading and no history.
    ///
    /// # Errors
    ///
    /// - `EmptyName` if the name is blank
    /// - `ArithmeticOverflow` if no further id can be assigned
    pub fn create(
        &mut self,
        name: &str,
        service_type: ServiceType,
    ) -> Result<&Account, BillingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BillingError::EmptyName);
        }

        let id = self.next_id()?;
        self.accounts.push(Account::new(id, name, service_type));

        let index = self.accounts.len() - 1;
        Ok(&self.accounts[index])
    }

    /// Look up an account by id
    pub fn find_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Look up an account by id, failing with `AccountNotFound`
    pub fn get(&self, id: AccountId) -> Result<&Account, BillingError> {
        self.find_by_id(id)
            .ok_or_else(|| BillingError::account_not_found(id))
    }

    /// Swap the stored record for `id` with `updated`
    ///
    /// Returns `false` and leaves the store untouched when no account has
    /// that id, or when `updated` carries a different id.
    pub fn replace(&mut self, id: AccountId, updated: Account) -> bool {
        if updated.id != id {
            return false;
        }

        match self.accounts.iter_mut().find(|account| account.id == id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// All accounts in registration order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Accounts with an outstanding balance, in registration order
    pub fn accounts_due(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|account| account.is_due())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_ID)
    }
}

/// The two sample customers the dashboard ships with
///
/// - 101 John Doe, Electricity, owes 44.65, last reading 231
/// - 102 Jane Smith, Water, owes 45.50, last reading 120
pub fn demo_accounts(date: DateTime<Utc>) -> Vec<Account> {
    vec![
        Account::with_opening_state(
            101,
            "John Doe",
            ServiceType::Electricity,
            dec!(44.65),
            dec!(231),
            date,
        ),
        Account::with_opening_state(
            102,
            "Jane Smith",
            ServiceType::Water,
            dec!(45.50),
            dec!(120),
            date,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_new_creates_empty_store() {
        let store = AccountStore::new(DEFAULT_BASE_ID);
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_create_on_empty_store_uses_base_id() {
        let mut store = AccountStore::new(101);

        let account = store.create("Alice", ServiceType::Water).unwrap();

        assert_eq!(account.id, 101);
        assert_eq!(account.name, "Alice");
        assert_eq!(account.service_type, ServiceType::Water);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.last_reading, Decimal::ZERO);
        assert!(account.history.is_empty());
    }

    #[test]
    fn test_create_uses_max_id_plus_one() {
        let mut store = AccountStore::new(101);
        store.create("Alice", ServiceType::Water).unwrap();

        let bob = store.create("Bob", ServiceType::Internet).unwrap();
        assert_eq!(bob.id, 102);
    }

    #[test]
    fn test_create_follows_highest_id_not_count() {
        let accounts = vec![
            Account::new(500, "Late", ServiceType::Water),
            Account::new(120, "Early", ServiceType::Water),
        ];
        let mut store = AccountStore::with_accounts(101, accounts).unwrap();

        let account = store.create("Next", ServiceType::Electricity).unwrap();
        assert_eq!(account.id, 501);
    }

    #[test]
    fn test_custom_base_id() {
        let mut store = AccountStore::new(1);
        assert_eq!(store.create("First", ServiceType::Water).unwrap().id, 1);
    }

    #[test]
    fn test_create_trims_name() {
        let mut store = AccountStore::default();
        let account = store.create("  Alice  ", ServiceType::Water).unwrap();
        assert_eq!(account.name, "Alice");
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut store = AccountStore::default();
        assert_eq!(
            store.create("   ", ServiceType::Water).unwrap_err(),
            BillingError::EmptyName
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_overflow_at_max_id() {
        let accounts = vec![Account::new(AccountId::MAX, "Max", ServiceType::Water)];
        let mut store = AccountStore::with_accounts(101, accounts).unwrap();

        let result = store.create("Overflow", ServiceType::Water);
        assert!(matches!(
            result,
            Err(BillingError::ArithmeticOverflow { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_with_accounts_rejects_duplicate_ids() {
        let accounts = vec![
            Account::new(101, "A", ServiceType::Water),
            Account::new(101, "B", ServiceType::Water),
        ];
        assert!(matches!(
            AccountStore::with_accounts(101, accounts),
            Err(BillingError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_find_by_id() {
        let store = AccountStore::with_accounts(101, demo_accounts(date())).unwrap();

        assert_eq!(store.find_by_id(102).unwrap().name, "Jane Smith");
        assert!(store.find_by_id(999).is_none());
        assert_eq!(
            store.get(999).unwrap_err(),
            BillingError::AccountNotFound { id: 999 }
        );
    }

    #[test]
    fn test_replace_swaps_record() {
        let mut store = AccountStore::with_accounts(101, demo_accounts(date())).unwrap();

        let mut updated = store.find_by_id(101).unwrap().clone();
        updated.balance = Decimal::ZERO;

        assert!(store.replace(101, updated));
        assert_eq!(store.find_by_id(101).unwrap().balance, Decimal::ZERO);
        // order preserved
        assert_eq!(store.accounts()[0].id, 101);
        assert_eq!(store.accounts()[1].id, 102);
    }

    #[test]
    fn test_replace_missing_id_is_noop() {
        let mut store = AccountStore::with_accounts(101, demo_accounts(date())).unwrap();
        let before = store.accounts().to_vec();

        let ghost = Account::new(999, "Ghost", ServiceType::Water);
        assert!(!store.replace(999, ghost));
        assert_eq!(store.accounts(), before.as_slice());
    }

    #[test]
    fn test_replace_with_mismatched_id_is_noop() {
        let mut store = AccountStore::with_accounts(101, demo_accounts(date())).unwrap();
        let impostor = Account::new(102, "Impostor", ServiceType::Water);

        assert!(!store.replace(101, impostor));
        assert_eq!(store.find_by_id(101).unwrap().name, "John Doe");
        assert_eq!(store.find_by_id(102).unwrap().name, "Jane Smith");
    }

    #[test]
    fn test_accounts_due() {
        let mut store = AccountStore::with_accounts(101, demo_accounts(date())).unwrap();
        store.create("Fresh", ServiceType::Internet).unwrap();

        let due: Vec<AccountId> = store.accounts_due().map(|account| account.id).collect();
        assert_eq!(due, vec![101, 102]);
    }

    #[test]
    fn test_demo_accounts_keep_balance_invariant() {
        for account in demo_accounts(date()) {
            assert_eq!(account.history_total(), account.balance);
        }
    }
}
