use serde::{Deserialize, Serialize};

use crate::data_models::SortReposBy;
use crate::presenter::ProfileReport;

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub username: String,
    pub sort_by: Option<SortReposBy>,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub report: ProfileReport,
    pub processing_time_ms: u128,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
