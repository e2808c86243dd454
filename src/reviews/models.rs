use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A review document as stored: an opaque id plus the client's JSON body
#[derive(Debug, Clone, FromRow)]
pub struct StoredReview {
    pub id: Uuid,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredReview {
    /// Render the document the way clients see it: the body's fields with
    /// the id merged in
    pub fn into_document(self) -> Value {
        let mut doc = match self.body {
            Value::Object(map) => map,
            other => {
                // The boundary rejects non-objects; a non-object body here
                // was written by something other than this server
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        doc.insert("id".to_string(), Value::String(self.id.to_string()));
        Value::Object(doc)
    }
}

/// Outcome of a field-merge update on a document
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct UpdateOutcome {
    pub matched: bool,
    pub modified: bool,
}

/// Response envelope for PATCH /review/update/:id
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewUpdateResponse {
    pub success: bool,
    pub message: String,
    pub result: UpdateOutcome,
}

/// Response for DELETE /review/:id
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteReport {
    pub deleted_count: u64,
}
