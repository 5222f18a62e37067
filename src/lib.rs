//! # reviews
//!
//! A non-blocking CRUD service for movie reviews.
//!
//! ## Pipeline
//!
//! ```text
//! hyper connection ─► Router (method + path) ─► route adapter (decode)
//!        ─► ReviewHandler (validate, await repository) ─► Result<T, ReviewError>
//!        ─► IntoResponse (success body, or status + plain-text message)
//! ```
//!
//! The store sits behind [`ReviewRepository`]; [`InMemoryReviewRepository`]
//! is the bundled implementation. TLS, compression, and body-size limits are
//! left to the reverse proxy in front of the service.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use reviews::{Config, InMemoryReviewRepository, Server, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), reviews::Error> {
//!     let config = Config::from_env()?;
//!     let app = routes::router(Arc::new(InMemoryReviewRepository::new()));
//!     Server::bind(config.addr).serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;

pub mod config;
pub mod health;
pub mod repository;
pub mod review;
pub mod review_handler;
pub mod routes;

pub use config::Config;
pub use error::{Error, ReviewError};
pub use handler::{Handler, with_state};
pub use method::Method;
pub use repository::{InMemoryReviewRepository, ReviewRepository, ReviewStream, StoreError};
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use review::Review;
pub use review_handler::ReviewHandler;
pub use router::Router;
pub use server::Server;
