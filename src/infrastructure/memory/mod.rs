//! In-memory implementations of the collaborator services.
//!
//! [`MemoryStore`] implements every trait in [`crate::domain::services`] on top
//! of a single `RwLock`-guarded data set, so one instance can back the whole
//! controller. Data lives as long as the process.
//!
//! # Modules
//!
//! - [`transactions`] - `TransactionService` with business rule checks
//! - [`catalog`] - accounts, transaction types, counter parties and currencies
//! - [`tokens`] - login token repository

pub mod catalog;
pub mod tokens;
pub mod transactions;

pub use tokens::MemoryTokenRepository;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::entities::{AccountTO, CounterPartyTO, TransactionTO, TransactionTypeTO};

/// Currencies offered by the reference service.
pub const DEFAULT_CURRENCIES: [&str; 4] = ["BYN", "EUR", "USD", "RUB"];

#[derive(Debug, Default)]
struct StoreData {
    accounts: BTreeMap<i64, AccountTO>,
    transaction_types: BTreeMap<i64, TransactionTypeTO>,
    counter_parties: BTreeMap<i64, CounterPartyTO>,
    transactions: BTreeMap<i64, TransactionTO>,
}

/// Process-local store backing all collaborator services.
///
/// Keys are allocated from one shared sequence, so a key never repeats across
/// entity kinds.
#[derive(Debug)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
    next_key: AtomicI64,
    currencies: Vec<String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store offering [`DEFAULT_CURRENCIES`].
    pub fn new() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
            next_key: AtomicI64::new(1),
            currencies: DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn next_key(&self) -> i64 {
        self.next_key.fetch_add(1, Ordering::Relaxed)
    }

    /// Opens an account with a zero balance.
    pub async fn add_account(&self, customer_key: i64, name: &str, currency: &str) -> AccountTO {
        let account = AccountTO {
            account_key: self.next_key(),
            customer_key,
            name: name.to_string(),
            currency: currency.to_ascii_uppercase(),
            balance: Decimal::ZERO,
        };

        self.data
            .write()
            .await
            .accounts
            .insert(account.account_key, account.clone());

        account
    }

    pub async fn add_transaction_type(
        &self,
        customer_key: i64,
        name: &str,
        description: Option<&str>,
    ) -> TransactionTypeTO {
        let transaction_type = TransactionTypeTO {
            transaction_type_key: self.next_key(),
            customer_key,
            name: name.to_string(),
            description: description.map(str::to_string),
        };

        self.data.write().await.transaction_types.insert(
            transaction_type.transaction_type_key,
            transaction_type.clone(),
        );

        transaction_type
    }

    pub async fn add_counter_party(&self, customer_key: i64, name: &str) -> CounterPartyTO {
        let counter_party = CounterPartyTO {
            counter_party_key: self.next_key(),
            customer_key,
            name: name.to_string(),
        };

        self.data
            .write()
            .await
            .counter_parties
            .insert(counter_party.counter_party_key, counter_party.clone());

        counter_party
    }

    /// Looks up an account regardless of owner.
    pub async fn account(&self, account_key: i64) -> Option<AccountTO> {
        self.data.read().await.accounts.get(&account_key).cloned()
    }

    /// Number of transactions stored for a customer.
    pub async fn transaction_count(&self, customer_key: i64) -> usize {
        self.data
            .read()
            .await
            .transactions
            .values()
            .filter(|t| t.customer_key == customer_key)
            .count()
    }

    /// Gives a customer a starter set of accounts, categories and counter parties.
    ///
    /// Customers that already own an account are left untouched.
    pub async fn seed_demo_customer(&self, customer_key: i64) {
        let already_seeded = self
            .data
            .read()
            .await
            .accounts
            .values()
            .any(|a| a.customer_key == customer_key);

        if already_seeded {
            return;
        }

        self.add_account(customer_key, "Cash", "BYN").await;
        self.add_account(customer_key, "Salary card", "USD").await;

        self.add_transaction_type(customer_key, "Food", Some("Groceries and eating out"))
            .await;
        self.add_transaction_type(customer_key, "Transport", None).await;
        self.add_transaction_type(customer_key, "Salary", Some("Monthly income"))
            .await;

        self.add_counter_party(customer_key, "Grocery store").await;
        self.add_counter_party(customer_key, "Employer").await;

        tracing::debug!(customer_key, "Seeded demo data");
    }
}
