// Authentication service - business logic layer

use crate::auth::{
    error::AuthError,
    models::{UpdateReport, UpdateUserRequest, User},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};
use tracing::{debug, info, warn};

/// Authentication service coordinating the credential store, the password
/// hasher and the token issuer
pub struct AuthService {
    users: UserRepository,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(users: UserRepository, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Register a new user
    ///
    /// One store mutation on success, none on conflict. The pre-insert
    /// lookup gives the common-path conflict answer; the unique index covers
    /// the race where two registrations pass the lookup simultaneously.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        debug!("Registering user with email: {}", email);

        if self.users.find_by_email(email).await?.is_some() {
            warn!("Registration rejected, email already taken: {}", email);
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = PasswordService::hash_password(password)?;
        let user = self.users.insert(username, email, &password_hash).await?;

        info!("Registered user id {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Login with email and password, returning a signed access token
    ///
    /// Unknown email and wrong password both map to `InvalidCredentials` so
    /// the response never reveals which one it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        debug!("Login attempt for email: {}", email);

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            warn!("Failed login for user id {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        info!("User id {} logged in", user.id);
        Ok(token)
    }

    /// Merge fields into the user record with this email
    pub async fn update_user(
        &self,
        email: &str,
        fields: &UpdateUserRequest,
    ) -> Result<UpdateReport, AuthError> {
        let report = self.users.update_by_email(email, fields).await?;
        if !report.matched {
            debug!("Update matched no user for email: {}", email);
            return Err(AuthError::UserNotFound);
        }
        info!("Updated user with email: {}", email);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use sqlx::PgPool;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Helper function to create a test database pool
    async fn create_test_pool() -> PgPool {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            "postgresql://review_user:review_pass@db:5432/review_db".to_string()
        });

        let pool = crate::db::create_pool(&database_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    /// Helper to produce an email no other test run has used
    fn unique_email(prefix: &str) -> String {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
        format!("{}{}{}@example.com", prefix, timestamp, counter)
    }

    fn create_service(pool: PgPool) -> AuthService {
        AuthService::new(
            UserRepository::new(pool),
            TokenService::new("test_secret_key_for_testing_purposes".to_string(), 3600),
        )
    }

    #[tokio::test]
    async fn register_stores_hashed_password() {
        let pool = create_test_pool().await;
        let service = create_service(pool.clone());
        let email = unique_email("reg");

        let user = service
            .register("alice", &email, "hunter2hunter2")
            .await
            .expect("registration should succeed");

        assert!(user.id > 0);
        assert_eq!(user.email, email);
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "hunter2hunter2");
        assert!(
            PasswordService::verify_password("hunter2hunter2", &user.password_hash).unwrap()
        );
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let pool = create_test_pool().await;
        let service = create_service(pool.clone());
        let email = unique_email("dup");

        service
            .register("first", &email, "password-one")
            .await
            .expect("first registration should succeed");

        let result = service.register("second", &email, "password-two").await;
        assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn login_returns_token_with_identity_claims() {
        let pool = create_test_pool().await;
        let service = create_service(pool.clone());
        let email = unique_email("login");

        let user = service
            .register("bob", &email, "super-secret-pw")
            .await
            .unwrap();

        let token = service
            .login(&email, "super-secret-pw")
            .await
            .expect("login should succeed");

        let tokens = TokenService::new("test_secret_key_for_testing_purposes".to_string(), 3600);
        let claims = tokens.verify(&token).expect("issued token should verify");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, email);
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let pool = create_test_pool().await;
        let service = create_service(pool.clone());
        let email = unique_email("badpw");

        service
            .register("carol", &email, "right-password")
            .await
            .unwrap();

        let wrong_password = service.login(&email, "wrong-password").await.unwrap_err();
        let unknown_email = service
            .login(&unique_email("ghost"), "any-password")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    // Two registrations for the same email may both pass the pre-insert
    // lookup; the unique index guarantees exactly one of them commits.
    #[tokio::test]
    async fn concurrent_registration_yields_single_account() {
        let pool = create_test_pool().await;
        let email = unique_email("race");

        let service_a = create_service(pool.clone());
        let service_b = create_service(pool.clone());

        let (a, b) = tokio::join!(
            service_a.register("racer-a", &email, "password-aaa"),
            service_b.register("racer-b", &email, "password-bbb"),
        );

        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one registration should win");

        let loser = if a.is_err() { a } else { b };
        assert!(matches!(loser, Err(AuthError::EmailAlreadyExists)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(&email)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn update_user_merges_fields() {
        let pool = create_test_pool().await;
        let service = create_service(pool.clone());
        let email = unique_email("patch");

        service
            .register("dave", &email, "another-password")
            .await
            .unwrap();

        let report = service
            .update_user(
                &email,
                &UpdateUserRequest {
                    username: Some("david".to_string()),
                    role: None,
                },
            )
            .await
            .expect("update should match");
        assert!(report.matched);

        let updated = service.users.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(updated.username, "david");
        assert_eq!(updated.role, Role::User, "omitted fields keep their values");
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let pool = create_test_pool().await;
        let service = create_service(pool.clone());

        let result = service
            .update_user(
                &unique_email("absent"),
                &UpdateUserRequest {
                    username: Some("nobody".to_string()),
                    role: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let pool = create_test_pool().await;
        let service = create_service(pool.clone());
        let email = unique_email("case");

        service
            .register("erin", &email, "casecase-pw")
            .await
            .unwrap();

        let shouted = email.to_uppercase();
        let result = service.login(&shouted, "casecase-pw").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
