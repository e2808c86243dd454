use crate::reviews::{error::ReviewError, models::StoredReview};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for the review document collection
#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new ReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a document, assigning a fresh id
    pub async fn insert(&self, body: Value) -> Result<StoredReview, ReviewError> {
        let review = sqlx::query_as::<_, StoredReview>(
            r#"
            INSERT INTO reviews (id, body)
            VALUES ($1, $2)
            RETURNING id, body, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    /// Find a document by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredReview>, ReviewError> {
        let review = sqlx::query_as::<_, StoredReview>(
            r#"
            SELECT id, body, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    /// Replace a document's body, bumping updated_at
    pub async fn replace_body(&self, id: Uuid, body: Value) -> Result<StoredReview, ReviewError> {
        let review = sqlx::query_as::<_, StoredReview>(
            r#"
            UPDATE reviews
            SET body = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, body, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    /// Delete a document, returning how many rows went away
    pub async fn delete(&self, id: Uuid) -> Result<u64, ReviewError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Fetch every document in the collection
    pub async fn find_all(&self) -> Result<Vec<StoredReview>, ReviewError> {
        let reviews = sqlx::query_as::<_, StoredReview>(
            r#"
            SELECT id, body, created_at, updated_at
            FROM reviews
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
