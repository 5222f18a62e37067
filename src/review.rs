//! The review document and its structural constraints.

use serde::{Deserialize, Serialize};

pub const MOVIE_INFO_ID_REQUIRED: &str = "movieinfoid should not be null";
pub const RATING_NEGATIVE: &str = "rating.negative : please pass a non-negative value";

/// A rating/comment left for one movie.
///
/// Every field is optional on the wire. `review_id` is assigned by the store
/// on first save; `movie_info_id` is required before anything is persisted
/// (see [`validate`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: Option<String>,
    pub movie_info_id: Option<i64>,
    pub comment: Option<String>,
    pub rating: Option<f64>,
}

impl Review {
    pub fn new(movie_info_id: i64, comment: impl Into<String>, rating: f64) -> Self {
        Self {
            review_id: None,
            movie_info_id: Some(movie_info_id),
            comment: Some(comment.into()),
            rating: Some(rating),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.review_id = Some(id.into());
        self
    }
}

/// Returns every constraint `review` violates, in check order.
///
/// Pure: no store access, no shared state.
pub fn validate(review: &Review) -> Vec<&'static str> {
    let mut violations = Vec::new();
    if review.movie_info_id.is_none() {
        violations.push(MOVIE_INFO_ID_REQUIRED);
    }
    if review.rating.is_some_and(|r| r < 0.0) {
        violations.push(RATING_NEGATIVE);
    }
    violations
}
