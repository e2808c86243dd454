// Reviews module
// A schemaless document collection: every route is one store call

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::ReviewError;
pub use models::{DeleteReport, ReviewUpdateResponse, StoredReview, UpdateOutcome};
pub use repository::ReviewRepository;
pub use service::ReviewService;
