//! Shared response envelope for API handlers.
//!
//! Successful responses wrap their payload in `{ "data": ... }`; errors use
//! the `{ "error", "code" }` shape produced by `AppError`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
