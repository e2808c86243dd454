// JWT issuance and verification

use crate::auth::{error::AuthError, models::{Role, User}};
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user id
    pub email: String,
    pub role: Role,
    pub iat: i64, // issued at timestamp
    pub exp: i64, // expiration timestamp
}

/// Token service for JWT operations
///
/// Secret and lifetime come from configuration; nothing here is hardcoded.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_seconds: i64,
}

impl TokenService {
    /// Create a new TokenService with the signing secret and token lifetime
    pub fn new(secret: String, ttl_seconds: i64) -> Self {
        Self { secret, ttl_seconds }
    }

    /// Issue a signed token carrying the user's identity claims
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims
    ///
    /// No route in this server consumes tokens; this exists for clients and
    /// for tests of the issuance contract.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::default();

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    const TEST_TTL: i64 = 3600;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string(), TEST_TTL)
    }

    fn test_user(id: i32, email: &str) -> User {
        User {
            id,
            username: "tester".to_string(),
            email: email.to_string(),
            password_hash: "unused".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_expiration_matches_configured_ttl() {
        let service = test_token_service();
        let token = service.issue(&test_user(1, "test@example.com")).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, TEST_TTL);
    }

    #[test]
    fn token_claims_contain_user_identity() {
        let service = test_token_service();
        let token = service.issue(&test_user(42, "user@example.com")).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = test_token_service();

        // Hand-craft claims whose expiry is well past the default leeway
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            email: "test@example.com".to_string(),
            role: Role::User,
            iat: now - 1000,
            exp: now - 500,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::ExpiredToken));
    }

    #[test]
    fn token_is_valid_before_expiry() {
        // A short but positive lifetime still verifies immediately after issue
        let service = TokenService::new("test_secret_key_for_testing_purposes".to_string(), 120);
        let token = service.issue(&test_user(1, "test@example.com")).unwrap();
        assert!(service.verify(&token).is_ok());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.verify("").is_err());
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("invalid_token_format").is_err());
        assert!(service
            .verify("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn token_signature_verification() {
        let service1 = TokenService::new("secret1".to_string(), TEST_TTL);
        let service2 = TokenService::new("secret2".to_string(), TEST_TTL);

        let token = service1.issue(&test_user(1, "test@example.com")).unwrap();

        assert!(service1.verify(&token).is_ok());
        assert!(service2.verify(&token).is_err());
    }

    proptest! {
        // Issued tokens always round-trip their identity claims
        #[test]
        fn prop_token_claims_contain_identity(
            user_id in 1i32..1000000,
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let service = test_token_service();
            let token = service.issue(&test_user(user_id, &email))?;
            let claims = service.verify(&token)?;

            prop_assert_eq!(claims.sub, user_id);
            prop_assert_eq!(claims.email, email);
            prop_assert_eq!(claims.exp - claims.iat, TEST_TTL);
        }

        // Random strings are rejected as invalid tokens
        #[test]
        fn prop_malformed_tokens_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.verify(&malformed).is_err());
        }
    }
}
