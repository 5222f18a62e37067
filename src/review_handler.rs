//! Review operations.
//!
//! One method per route. Each method validates (where the operation takes a
//! payload), awaits the repository, and returns either the typed result or a
//! [`ReviewError`]. Nothing here builds an HTTP response; that is left to the
//! route adapters and the error mapper.

use std::collections::BTreeSet;
use std::future;
use std::sync::Arc;

use futures::TryStreamExt;
use tracing::{debug, warn};

use crate::error::ReviewError;
use crate::repository::ReviewRepository;
use crate::review::{self, Review};

/// Orchestrates validation and store calls for the review routes.
///
/// Holds nothing but the shared repository handle, so clones are cheap and
/// any number of requests may run through it concurrently.
#[derive(Clone)]
pub struct ReviewHandler {
    repository: Arc<dyn ReviewRepository>,
}

impl ReviewHandler {
    pub fn new(repository: Arc<dyn ReviewRepository>) -> Self {
        Self { repository }
    }

    pub async fn add_review(&self, review: Review) -> Result<Review, ReviewError> {
        ensure_valid(&review)?;
        let saved = self.repository.save(review).await?;
        debug!(review_id = ?saved.review_id, "review created");
        Ok(saved)
    }

    pub async fn get_all_reviews(&self) -> Result<Vec<Review>, ReviewError> {
        Ok(self.repository.find_all().try_collect().await?)
    }

    /// Replaces every field of the stored review `id` with the payload's.
    ///
    /// `payload` is only decoded and validated once `id` is known to exist,
    /// so a missing review answers [`ReviewError::NotFound`] whatever the
    /// request body holds.
    ///
    /// The path id wins over `payload.review_id`: the stored document keeps
    /// its identity, so an update can never move or duplicate a record.
    pub async fn update_review<F>(&self, id: &str, payload: F) -> Result<Review, ReviewError>
    where
        F: FnOnce() -> Result<Review, ReviewError> + Send,
    {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(ReviewError::not_found)?;

        let payload = payload()?;
        ensure_valid(&payload)?;
        if payload.review_id.as_deref().is_some_and(|p| p != id) {
            warn!(review_id = %id, payload_id = ?payload.review_id, "ignoring payload reviewId");
        }
        let merged = Review { review_id: existing.review_id, ..payload };

        let saved = self.repository.save(merged).await?;
        debug!(review_id = %id, "review updated");
        Ok(saved)
    }

    /// Deletes review `id`. Succeeds whether or not it existed.
    ///
    /// The existence lookup only feeds the log line; `delete_by_id` is issued
    /// even when it finds nothing.
    pub async fn delete_review(&self, id: &str) -> Result<(), ReviewError> {
        let existed = self.repository.find_by_id(id).await?.is_some();
        self.repository.delete_by_id(id).await?;
        debug!(review_id = %id, existed, "review deleted");
        Ok(())
    }

    pub async fn get_reviews_by_movie_info_id(
        &self,
        movie_info_id: i64,
    ) -> Result<Vec<Review>, ReviewError> {
        Ok(self
            .repository
            .find_by_movie_info_id(movie_info_id)
            .try_filter(|r| future::ready(r.movie_info_id == Some(movie_info_id)))
            .try_collect()
            .await?)
    }
}

/// Folds all violations into a single [`ReviewError::Validation`]:
/// deduplicated, sorted, comma-joined.
fn ensure_valid(review: &Review) -> Result<(), ReviewError> {
    let violations: BTreeSet<&str> = review::validate(review).into_iter().collect();
    if violations.is_empty() {
        return Ok(());
    }
    Err(ReviewError::Validation(violations.into_iter().collect::<Vec<_>>().join(",")))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use futures::stream::{self, StreamExt};

    use super::*;
    use crate::repository::{InMemoryReviewRepository, ReviewStream, StoreError};
    use crate::review::{MOVIE_INFO_ID_REQUIRED, RATING_NEGATIVE};

    /// Records every call and fails each one; proves which operations reach
    /// the store at all.
    #[derive(Default)]
    struct Unreachable {
        calls: Mutex<Vec<&'static str>>,
    }

    impl Unreachable {
        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReviewRepository for Unreachable {
        fn find_all(&self) -> ReviewStream {
            self.record("find_all");
            stream::iter([Err(StoreError::Unavailable("down".into()))]).boxed()
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<Review>, StoreError> {
            self.record("find_by_id");
            Err(StoreError::Unavailable("down".into()))
        }

        fn find_by_movie_info_id(&self, _movie_info_id: i64) -> ReviewStream {
            self.record("find_by_movie_info_id");
            stream::iter([Err(StoreError::Unavailable("down".into()))]).boxed()
        }

        async fn save(&self, _review: Review) -> Result<Review, StoreError> {
            self.record("save");
            Err(StoreError::Backend("write rejected".into()))
        }

        async fn delete_by_id(&self, _id: &str) -> Result<(), StoreError> {
            self.record("delete_by_id");
            Err(StoreError::Unavailable("down".into()))
        }
    }

    fn seeded() -> (InMemoryReviewRepository, ReviewHandler) {
        let repo = InMemoryReviewRepository::with_reviews([
            Review::new(1, "super", 5.0).with_id("r1"),
            Review::new(2, "average", 4.0).with_id("r2"),
        ]);
        let handler = ReviewHandler::new(Arc::new(repo.clone()));
        (repo, handler)
    }

    #[test]
    fn violations_are_sorted_and_joined() {
        let review = Review { rating: Some(-5.0), ..Review::default() };
        let err = ensure_valid(&review).unwrap_err();
        assert_eq!(err.to_string(), format!("{MOVIE_INFO_ID_REQUIRED},{RATING_NEGATIVE}"));
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_the_store() {
        let repo = Arc::new(Unreachable::default());
        let handler = ReviewHandler::new(repo.clone());

        let err = handler.add_review(Review::default()).await.unwrap_err();
        assert!(matches!(err, ReviewError::Validation(_)));

        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn update_looks_up_the_review_before_reading_the_payload() {
        let repo = Arc::new(Unreachable::default());
        let handler = ReviewHandler::new(repo.clone());

        let err = handler
            .update_review("r1", || panic!("payload decoded before lookup"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::Store(StoreError::Unavailable(_))));
        assert_eq!(repo.calls(), vec!["find_by_id"]);
    }

    #[tokio::test]
    async fn missing_review_wins_over_a_bad_payload() {
        let (repo, handler) = seeded();

        let err = handler.update_review("missing", || Ok(Review::default())).await.unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(_)));

        let err = handler
            .update_review("missing", || Err(ReviewError::malformed("not json")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "review not found");

        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn invalid_update_of_existing_review_leaves_it_untouched() {
        let (repo, handler) = seeded();
        let before = repo.find_by_id("r1").await.unwrap();

        let payload = Review { rating: Some(-1.0), ..Review::default() };
        let err = handler.update_review("r1", || Ok(payload)).await.unwrap_err();
        assert_eq!(err.to_string(), format!("{MOVIE_INFO_ID_REQUIRED},{RATING_NEGATIVE}"));

        let err = handler
            .update_review("r1", || Err(ReviewError::malformed("not json")))
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::Malformed(_)));

        assert_eq!(repo.find_by_id("r1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn store_failures_propagate_unchanged() {
        let repo = Arc::new(Unreachable::default());
        let handler = ReviewHandler::new(repo.clone());

        let err = handler.add_review(Review::new(1, "ok", 1.0)).await.unwrap_err();
        assert!(matches!(err, ReviewError::Store(StoreError::Backend(_))));
        assert_eq!(err.to_string(), "store error: write rejected");

        let err = handler.get_all_reviews().await.unwrap_err();
        assert_eq!(err.to_string(), "store unavailable: down");

        let err = handler.delete_review("r1").await.unwrap_err();
        assert!(matches!(err, ReviewError::Store(_)));

        assert_eq!(repo.calls(), vec!["save", "find_all", "find_by_id"]);
    }

    #[tokio::test]
    async fn create_assigns_an_id() {
        let (repo, handler) = seeded();
        let saved = handler.add_review(Review::new(3, "super movie", 5.0)).await.unwrap();
        assert!(saved.review_id.is_some());
        assert_eq!(saved.comment.as_deref(), Some("super movie"));
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn update_missing_review_is_not_found() {
        let (_, handler) = seeded();
        let err = handler
            .update_review("missing", || Ok(Review::new(1, "x", 1.0)))
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(_)));
        assert_eq!(err.to_string(), "review not found");
    }

    #[tokio::test]
    async fn update_replaces_all_fields_but_keeps_path_id() {
        let (repo, handler) = seeded();
        let payload = Review { review_id: Some("other".into()), ..Review::new(9, "updated", 1.5) };

        let updated = handler.update_review("r1", || Ok(payload)).await.unwrap();
        assert_eq!(updated, Review::new(9, "updated", 1.5).with_id("r1"));

        assert_eq!(repo.len().await, 2);
        assert_eq!(repo.find_by_id("r1").await.unwrap(), Some(updated));
        assert!(repo.find_by_id("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_clears_fields_absent_from_payload() {
        let (repo, handler) = seeded();
        let payload = Review { movie_info_id: Some(1), ..Review::default() };

        handler.update_review("r1", || Ok(payload)).await.unwrap();
        let stored = repo.find_by_id("r1").await.unwrap().unwrap();
        assert_eq!(stored.comment, None);
        assert_eq!(stored.rating, None);
    }

    #[tokio::test]
    async fn delete_removes_and_tolerates_missing() {
        let (repo, handler) = seeded();
        handler.delete_review("r1").await.unwrap();
        assert!(repo.find_by_id("r1").await.unwrap().is_none());

        handler.delete_review("r1").await.unwrap();
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn list_by_movie_returns_only_that_movie() {
        let (_, handler) = seeded();
        handler.add_review(Review::new(1, "again", 3.0)).await.unwrap();

        let reviews = handler.get_reviews_by_movie_info_id(1).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.movie_info_id == Some(1)));

        assert!(handler.get_reviews_by_movie_info_id(42).await.unwrap().is_empty());
    }
}
