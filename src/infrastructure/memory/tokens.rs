//! In-memory login token repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::repositories::{CustomerToken, TokenRepository};
use crate::error::AppError;

/// Token repository filled from configuration at startup.
///
/// Maps token hashes to customers. Several tokens may point at one customer.
#[derive(Debug, Default)]
pub struct MemoryTokenRepository {
    tokens: RwLock<HashMap<String, CustomerToken>>,
}

impl MemoryTokenRepository {
    /// Builds a repository from `(customer_key, token_hash)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (i64, String)>) -> Self {
        let tokens = entries
            .into_iter()
            .map(|(customer_key, token_hash)| {
                let token_hash = token_hash.to_ascii_lowercase();
                (
                    token_hash.clone(),
                    CustomerToken {
                        customer_key,
                        token_hash,
                        last_used_at: None,
                    },
                )
            })
            .collect();

        Self {
            tokens: RwLock::new(tokens),
        }
    }

    /// Distinct customer keys with at least one token, ascending.
    pub async fn customer_keys(&self) -> Vec<i64> {
        let mut keys: Vec<i64> = self
            .tokens
            .read()
            .await
            .values()
            .map(|t| t.customer_key)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn find_customer(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        Ok(self
            .tokens
            .read()
            .await
            .get(token_hash)
            .map(|t| t.customer_key))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().await;

        let token = tokens.get_mut(token_hash).ok_or_else(|| {
            AppError::not_found("Token not found", json!({"reason": "Unknown token hash"}))
        })?;
        token.last_used_at = Some(Utc::now());

        Ok(())
    }

    async fn list_tokens(&self) -> Result<Vec<CustomerToken>, AppError> {
        let mut tokens: Vec<CustomerToken> = self.tokens.read().await.values().cloned().collect();
        tokens.sort_by(|a, b| a.customer_key.cmp(&b.customer_key));
        Ok(tokens)
    }
}
