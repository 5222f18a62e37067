//! Process-local document store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{StreamExt, stream};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{ReviewRepository, ReviewStream, StoreError};
use crate::review::Review;

type Documents = Arc<RwLock<HashMap<String, Review>>>;

/// A [`ReviewRepository`] holding documents in memory.
///
/// Cloning is cheap and every clone sees the same documents. Each call is
/// atomic with respect to the others; there is no cross-call isolation.
#[derive(Clone, Default)]
pub struct InMemoryReviewRepository {
    docs: Documents,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `reviews`. Reviews without an id
    /// get one assigned, as with [`ReviewRepository::save`].
    pub fn with_reviews(reviews: impl IntoIterator<Item = Review>) -> Self {
        let docs: HashMap<String, Review> = reviews.into_iter().map(assign_id).collect();
        Self { docs: Arc::new(RwLock::new(docs)) }
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    /// Snapshots the matching documents under the read lock, then yields them
    /// as a stream once the lock is released.
    fn scan<F>(&self, keep: F) -> ReviewStream
    where
        F: Fn(&Review) -> bool + Send + 'static,
    {
        let docs = Arc::clone(&self.docs);
        stream::once(async move {
            let docs = docs.read().await;
            docs.values().filter(|&r| keep(r)).cloned().collect::<Vec<_>>()
        })
        .flat_map(|reviews| stream::iter(reviews.into_iter().map(Ok)))
        .boxed()
    }
}

fn assign_id(mut review: Review) -> (String, Review) {
    let id = review
        .review_id
        .get_or_insert_with(|| Uuid::new_v4().to_string())
        .clone();
    (id, review)
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    fn find_all(&self) -> ReviewStream {
        self.scan(|_| true)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, StoreError> {
        Ok(self.docs.read().await.get(id).cloned())
    }

    fn find_by_movie_info_id(&self, movie_info_id: i64) -> ReviewStream {
        self.scan(move |r| r.movie_info_id == Some(movie_info_id))
    }

    async fn save(&self, review: Review) -> Result<Review, StoreError> {
        let (id, review) = assign_id(review);
        debug!(review_id = %id, "saving review");
        self.docs.write().await.insert(id, review.clone());
        Ok(review)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let removed = self.docs.write().await.remove(id).is_some();
        debug!(review_id = %id, removed, "deleted review");
        Ok(())
    }
}
