//! Liveness handler.
//!
//! `GET /v1/helloworld` answers `200 OK` with body `helloworld`. It touches no
//! dependency: if the process can respond to HTTP at all, it is alive.

use crate::{Request, Response};

pub async fn hello_world(_req: Request) -> Response {
    Response::text("helloworld")
}
