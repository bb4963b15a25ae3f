//! Authentication service for customer login tokens.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw token with HMAC-SHA256 keyed by `signing_secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. Shared with the admin CLI
/// so issued tokens hash identically on both sides.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service resolving login tokens to customer keys.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before lookup,
/// so the token table alone cannot be used to log in.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository holding registered hashes
    /// - `signing_secret` - HMAC key; must match the value used when tokens were issued
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token and returns the customer key it belongs to.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure to record
    /// that is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is blank or unknown.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn authenticate(&self, token: &str) -> Result<i64, AppError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Token is empty"}),
            ));
        }

        let token_hash = hash_token(&self.signing_secret, token);

        let customer_key = self
            .repository
            .find_customer(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({"reason": "Unknown token"}))
            })?;

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(customer_key, error = %e, "Failed to record token usage");
        }

        Ok(customer_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTokenRepository;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockTokenRepository::new();

        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token);
        let expected_for_update = expected_hash.clone();

        mock_repo
            .expect_find_customer()
            .withf(move |hash| hash == &expected_hash)
            .times(1)
            .returning(|_| Ok(Some(42)));

        mock_repo
            .expect_update_last_used()
            .withf(move |hash| hash == &expected_for_update)
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate(token).await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_authenticate_trims_token() {
        let mut mock_repo = MockTokenRepository::new();

        let expected_hash = hash_token(&test_secret(), "padded");

        mock_repo
            .expect_find_customer()
            .withf(move |hash| hash == &expected_hash)
            .times(1)
            .returning(|_| Ok(Some(1)));
        mock_repo
            .expect_update_last_used()
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert_eq!(service.authenticate("  padded \n").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_customer()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_empty_token_skips_lookup() {
        let mock_repo = MockTokenRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("   ").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_ignores_usage_update_failure() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_customer()
            .returning(|_| Ok(Some(5)));
        mock_repo
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("storage down", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert_eq!(service.authenticate("token").await.unwrap(), 5);
    }

    #[test]
    fn test_hash_token_consistency() {
        let hash1 = hash_token(&test_secret(), "test-token");
        let hash2 = hash_token(&test_secret(), "test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_token_secret_matters() {
        assert_ne!(hash_token("secret-a", "token"), hash_token("secret-b", "token"));
    }
}
