//! In-memory `TransactionService`.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::{MemoryStore, StoreData};
use crate::domain::entities::{AccountTO, TransactionKind, TransactionTO};
use crate::domain::issues::IssueLog;
use crate::domain::issues::codes::{create_transaction, delete_transaction};
use crate::domain::queries::{DeleteTransactionQuery, TransactionCreateQuery, TransactionListQuery};
use crate::domain::results::{ResultListTO, ResultTO};
use crate::domain::services::TransactionService;
use crate::error::AppError;

/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Checks a create query against the store and collects every violated rule.
///
/// Returns the target account and its balance after posting the amount.
fn check_create(
    data: &StoreData,
    query: &TransactionCreateQuery,
) -> Result<(AccountTO, Decimal), IssueLog> {
    let mut issues = IssueLog::new();

    match query.amount {
        None => issues.add(create_transaction::AMOUNT_IS_MANDATORY),
        Some(amount) if amount <= Decimal::ZERO => {
            issues.add(create_transaction::AMOUNT_IS_INCORRECT)
        }
        Some(_) => {}
    }

    let description = query.description.trim();
    if description.is_empty() {
        issues.add(create_transaction::DESCRIPTION_IS_MANDATORY);
    } else if description.chars().count() > MAX_DESCRIPTION_LEN {
        issues.add(create_transaction::DESCRIPTION_IS_TOO_LARGE);
    }

    let account = match query.account_key {
        None => {
            issues.add(create_transaction::ACCOUNT_IS_MANDATORY);
            None
        }
        Some(key) => {
            let owned = data
                .accounts
                .get(&key)
                .filter(|a| a.customer_key == query.customer_key);
            if owned.is_none() {
                issues.add(create_transaction::ACCOUNT_NOT_FOUND);
            }
            owned
        }
    };

    // Blank currency means "use the account's currency".
    if let Some(account) = account
        && !query.currency.trim().is_empty()
        && !query.currency.trim().eq_ignore_ascii_case(&account.currency)
    {
        issues.add(create_transaction::CURRENCY_IS_NOT_MATCH_WITH_ACCOUNT_CURRENCY);
    }

    let type_owned = query
        .transaction_type_key
        .and_then(|key| data.transaction_types.get(&key))
        .is_some_and(|t| t.customer_key == query.customer_key);
    if !type_owned {
        issues.add(create_transaction::TRANSACTION_TYPE_NOT_FOUND);
    }

    if let Some(key) = query.counter_party_key {
        let party_owned = data
            .counter_parties
            .get(&key)
            .is_some_and(|p| p.customer_key == query.customer_key);
        if !party_owned {
            issues.add(create_transaction::COUNTER_PARTY_NOT_FOUND);
        }
    }

    let (Some(account), Some(amount)) = (account, query.amount) else {
        return Err(issues);
    };
    if !issues.is_empty() {
        return Err(issues);
    }

    // An amount the balance cannot absorb is rejected like any other bad amount.
    let posted = match query.kind.unwrap_or(TransactionKind::Expense) {
        TransactionKind::Income => account.balance.checked_add(amount),
        TransactionKind::Expense => account.balance.checked_sub(amount),
    };
    match posted {
        Some(balance) => Ok((account.clone(), balance)),
        None => {
            issues.add(create_transaction::AMOUNT_IS_INCORRECT);
            Err(issues)
        }
    }
}

#[async_trait]
impl TransactionService for MemoryStore {
    async fn delete_transaction(
        &self,
        query: DeleteTransactionQuery,
    ) -> Result<ResultTO<TransactionTO>, AppError> {
        let mut data = self.data.write().await;

        let Some(target) = data
            .transactions
            .get(&query.transaction_key)
            .filter(|t| t.customer_key == query.customer_key)
        else {
            let mut issues = IssueLog::new();
            issues.add(delete_transaction::TRANSACTION_NOT_FOUND);
            return Ok(ResultTO::Issues(issues));
        };

        let account_key = target.account_key;
        let reverted = match data.accounts.get(&account_key) {
            Some(account) => match account.balance.checked_sub(target.signed_amount()) {
                Some(balance) => Some(balance),
                None => {
                    let mut issues = IssueLog::new();
                    issues.add(delete_transaction::BALANCE_OUT_OF_RANGE);
                    return Ok(ResultTO::Issues(issues));
                }
            },
            None => None,
        };

        let Some(removed) = data.transactions.remove(&query.transaction_key) else {
            return Err(AppError::internal(
                "Transaction vanished during delete",
                serde_json::json!({"transaction_key": query.transaction_key}),
            ));
        };

        if let (Some(account), Some(balance)) = (data.accounts.get_mut(&account_key), reverted) {
            account.balance = balance;
        }

        tracing::info!(
            transaction_key = removed.transaction_key,
            customer_key = removed.customer_key,
            "Transaction deleted"
        );

        Ok(ResultTO::Success(removed))
    }

    async fn fetch_transactions(
        &self,
        query: TransactionListQuery,
    ) -> Result<ResultListTO<TransactionTO>, AppError> {
        let data = self.data.read().await;

        let mut owned: Vec<&TransactionTO> = data
            .transactions
            .values()
            .filter(|t| t.customer_key == query.customer_key)
            .collect();

        // Newest first; key breaks ties between same-instant inserts.
        owned.sort_by(|a, b| {
            b.process_date
                .cmp(&a.process_date)
                .then(b.transaction_key.cmp(&a.transaction_key))
        });

        let total_count = owned.len() as u64;
        let list = owned
            .into_iter()
            .skip(query.offset())
            .take(query.page_size as usize)
            .cloned()
            .collect();

        Ok(ResultListTO::Listed {
            list,
            page_size: query.page_size,
            total_count,
        })
    }

    async fn create_transaction(
        &self,
        query: TransactionCreateQuery,
    ) -> Result<ResultTO<TransactionTO>, AppError> {
        let mut data = self.data.write().await;

        let (account, balance) = match check_create(&data, &query) {
            Ok(checked) => checked,
            Err(issues) => {
                tracing::debug!(
                    customer_key = query.customer_key,
                    codes = ?issues.codes(),
                    "Transaction rejected"
                );
                return Ok(ResultTO::Issues(issues));
            }
        };

        let (Some(amount), Some(transaction_type_key)) = (query.amount, query.transaction_type_key)
        else {
            return Err(AppError::internal(
                "Validated query is missing fields",
                serde_json::json!({}),
            ));
        };

        let transaction_type_name = data
            .transaction_types
            .get(&transaction_type_key)
            .map(|t| t.name.clone())
            .unwrap_or_default();
        let counter_party_name = query
            .counter_party_key
            .and_then(|key| data.counter_parties.get(&key))
            .map(|p| p.name.clone());

        let transaction = TransactionTO {
            transaction_key: self.next_key(),
            customer_key: query.customer_key,
            account_key: account.account_key,
            account_name: account.name.clone(),
            transaction_type_key,
            transaction_type_name,
            counter_party_key: query.counter_party_key,
            counter_party_name,
            kind: query.kind.unwrap_or(TransactionKind::Expense),
            amount,
            currency: account.currency.clone(),
            description: query.description.trim().to_string(),
            process_date: Utc::now(),
        };

        if let Some(account) = data.accounts.get_mut(&account.account_key) {
            account.balance = balance;
        }

        data.transactions
            .insert(transaction.transaction_key, transaction.clone());

        tracing::info!(
            transaction_key = transaction.transaction_key,
            customer_key = transaction.customer_key,
            "Transaction created"
        );

        Ok(ResultTO::Success(transaction))
    }
}
