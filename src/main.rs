//! Review service binary.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:8081/v1/helloworld
//!   curl -X POST http://localhost:8081/v1/reviews/add \
//!        -H 'content-type: application/json' \
//!        -d '{"movieInfoId":1,"comment":"super","rating":5.0}'
//!   curl http://localhost:8081/v1/reviews/1

use std::sync::Arc;

use reviews::{Config, Error, InMemoryReviewRepository, Server, config, routes};

#[tokio::main]
async fn main() -> Result<(), Error> {
    config::init_tracing();

    let config = Config::from_env()?;
    let app = routes::router(Arc::new(InMemoryReviewRepository::new()));

    Server::bind(config.addr).serve(app).await
}
