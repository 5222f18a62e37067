//! The review route table and its request adapters.
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | GET | `/v1/helloworld` | liveness |
//! | POST | `/v1/reviews/add` | [`ReviewHandler::add_review`] |
//! | GET | `/v1/reviews` | [`ReviewHandler::get_all_reviews`] |
//! | PUT | `/v1/reviews/update/{id}` | [`ReviewHandler::update_review`] |
//! | DELETE | `/v1/reviews/delete/{id}` | [`ReviewHandler::delete_review`] |
//! | GET | `/v1/reviews/{movieInfoId}` | [`ReviewHandler::get_reviews_by_movie_info_id`] |
//!
//! Adapters only decode the request (path parameters, JSON body) and pick the
//! success status. Failures flow out as [`ReviewError`] and are rendered by
//! its `IntoResponse` impl.

use std::sync::Arc;

use http::StatusCode;

use crate::error::ReviewError;
use crate::handler::with_state;
use crate::health;
use crate::method::Method;
use crate::repository::ReviewRepository;
use crate::request::Request;
use crate::response::Json;
use crate::review::Review;
use crate::review_handler::ReviewHandler;
use crate::router::Router;

/// Builds the full application router over `repository`.
#[rustfmt::skip]
pub fn router(repository: Arc<dyn ReviewRepository>) -> Router {
    let reviews = ReviewHandler::new(repository);

    Router::new()
        .on(Method::Get,    "/v1/helloworld",           health::hello_world)
        .on(Method::Post,   "/v1/reviews/add",          with_state(reviews.clone(), add_review))
        .on(Method::Get,    "/v1/reviews",              with_state(reviews.clone(), get_all_reviews))
        .on(Method::Put,    "/v1/reviews/update/{id}",  with_state(reviews.clone(), update_review))
        .on(Method::Delete, "/v1/reviews/delete/{id}",  with_state(reviews.clone(), delete_review))
        .on(Method::Get,    "/v1/reviews/{movieInfoId}", with_state(reviews, get_reviews_by_movie_info_id))
}

// POST /v1/reviews/add
async fn add_review(reviews: ReviewHandler, req: Request) -> Result<Json<Review>, ReviewError> {
    let review = payload(&req)?;
    reviews.add_review(review).await.map(Json)
}

// GET /v1/reviews
async fn get_all_reviews(reviews: ReviewHandler, _req: Request) -> Result<Json<Vec<Review>>, ReviewError> {
    reviews.get_all_reviews().await.map(Json)
}

// PUT /v1/reviews/update/{id}
async fn update_review(reviews: ReviewHandler, req: Request) -> Result<Json<Review>, ReviewError> {
    let id = path_param(&req, "id")?;
    reviews.update_review(id, || payload(&req)).await.map(Json)
}

// DELETE /v1/reviews/delete/{id} → 204 No Content
async fn delete_review(reviews: ReviewHandler, req: Request) -> Result<StatusCode, ReviewError> {
    let id = path_param(&req, "id")?;
    reviews.delete_review(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /v1/reviews/{movieInfoId}
async fn get_reviews_by_movie_info_id(
    reviews: ReviewHandler,
    req: Request,
) -> Result<Json<Vec<Review>>, ReviewError> {
    let raw = path_param(&req, "movieInfoId")?;
    let movie_info_id: i64 = raw
        .parse()
        .map_err(|e| ReviewError::malformed(format!("invalid movieInfoId `{raw}`: {e}")))?;
    reviews.get_reviews_by_movie_info_id(movie_info_id).await.map(Json)
}

fn path_param<'a>(req: &'a Request, name: &str) -> Result<&'a str, ReviewError> {
    req.param(name)
        .ok_or_else(|| ReviewError::malformed(format!("missing path parameter `{name}`")))
}

fn payload(req: &Request) -> Result<Review, ReviewError> {
    req.json()
        .map_err(|e| ReviewError::malformed(format!("invalid review payload: {e}")))
}
