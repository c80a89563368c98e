//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope, except the backup
//! export which is the bare snapshot file.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
