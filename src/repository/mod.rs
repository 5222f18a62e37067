//! Repository port for review documents.
//!
//! The handler only ever talks to the store through [`ReviewRepository`].
//! Implementations are injected behind an `Arc<dyn ReviewRepository>` and are
//! shared by every in-flight request, so they must be `Send + Sync` and manage
//! their own interior synchronisation.

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::review::Review;

mod memory;

pub use memory::InMemoryReviewRepository;

/// A stream of documents as produced by a store cursor.
pub type ReviewStream = BoxStream<'static, Result<Review, StoreError>>;

/// Failure reported by a store implementation.
///
/// Propagated unmodified up to the error mapper; nothing in the request
/// pipeline retries.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store was reached but refused or failed the operation.
    #[error("store error: {0}")]
    Backend(String),
}

/// Async CRUD over review documents, keyed by review id and by movie id.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Every stored review, in no particular order.
    fn find_all(&self) -> ReviewStream;

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, StoreError>;

    /// Every stored review whose `movie_info_id` equals `movie_info_id`.
    fn find_by_movie_info_id(&self, movie_info_id: i64) -> ReviewStream;

    /// Inserts `review` when it has no id (assigning one), otherwise replaces
    /// the document with that id. Returns the document as stored.
    async fn save(&self, review: Review) -> Result<Review, StoreError>;

    /// Removes the document with `id`. Removing an absent id is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}
