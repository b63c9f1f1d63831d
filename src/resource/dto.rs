use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub message: String,
    pub detail: Record,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Query string for resources without a list filter; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct NoFilter {}
