use crate::reviews::{
    error::ReviewError,
    models::{StoredReview, UpdateOutcome},
    repository::ReviewRepository,
};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Service layer for the review document collection
///
/// Each operation is one store call plus the id/shape checks the endpoint
/// contract asks for.
#[derive(Clone)]
pub struct ReviewService {
    repository: ReviewRepository,
}

impl ReviewService {
    /// Create a new ReviewService
    pub fn new(repository: ReviewRepository) -> Self {
        Self { repository }
    }

    fn parse_id(id: &str) -> Result<Uuid, ReviewError> {
        Uuid::parse_str(id).map_err(|_| ReviewError::InvalidId)
    }

    /// Store a new review document
    pub async fn create_review(&self, document: Value) -> Result<StoredReview, ReviewError> {
        if !document.is_object() {
            return Err(ReviewError::InvalidDocument);
        }
        let review = self.repository.insert(document).await?;
        debug!("Stored review document {}", review.id);
        Ok(review)
    }

    /// Fetch a review document by its id string
    pub async fn get_review(&self, id: &str) -> Result<StoredReview, ReviewError> {
        let id = Self::parse_id(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ReviewError::NotFound)
    }

    /// Merge a field map into an existing document
    ///
    /// Mirrors a document-store `$set`: provided keys overwrite, everything
    /// else is untouched. Reports whether anything actually changed so the
    /// handler can say "no changes made".
    pub async fn update_review(
        &self,
        id: &str,
        fields: Value,
    ) -> Result<UpdateOutcome, ReviewError> {
        let id = Self::parse_id(id)?;
        let fields = match fields {
            Value::Object(map) => map,
            _ => return Err(ReviewError::InvalidDocument),
        };

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ReviewError::NotFound)?;

        let mut merged = match existing.body.clone() {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        for (key, value) in fields {
            merged.insert(key, value);
        }
        let merged = Value::Object(merged);

        if merged == existing.body {
            debug!("Update to review {} changed nothing", id);
            return Ok(UpdateOutcome {
                matched: true,
                modified: false,
            });
        }

        self.repository.replace_body(id, merged).await?;
        Ok(UpdateOutcome {
            matched: true,
            modified: true,
        })
    }

    /// Delete a review document
    pub async fn delete_review(&self, id: &str) -> Result<u64, ReviewError> {
        let id = Self::parse_id(id)?;
        self.repository.delete(id).await
    }

    /// List every review document
    pub async fn list_reviews(&self) -> Result<Vec<Value>, ReviewError> {
        let reviews = self.repository.find_all().await?;
        Ok(reviews
            .into_iter()
            .map(StoredReview::into_document)
            .collect())
    }
}
