use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::github::FetchError;
use crate::search::{ProfileSearch, SearchError};

use super::models::{ErrorResponse, ProfileRequest, ProfileResponse};

/// Upper bound on `count` accepted from clients.
pub const MAX_COUNT: usize = 100;

pub async fn profile_handler(
    State(search): State<Arc<ProfileSearch>>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, Json<ErrorResponse>)> {
    let start = Instant::now();

    let sort_by = request.sort_by.unwrap_or(search.sort_by());
    let count = effective_count(request.count, search.count());

    let report = search
        .load_user_profile_with(&request.username, sort_by, count)
        .await
        .map_err(|e| {
            log::error!("profile search for {:?} failed: {:#}", request.username, e);
            (
                status_for(&e),
                Json(ErrorResponse {
                    error: e.user_message().to_string(),
                }),
            )
        })?;

    Ok(Json(ProfileResponse {
        report,
        processing_time_ms: start.elapsed().as_millis(),
    }))
}

/// Client count if given, else the configured one, never above [`MAX_COUNT`].
fn effective_count(requested: Option<usize>, configured: usize) -> usize {
    requested.unwrap_or(configured).min(MAX_COUNT)
}

fn status_for(error: &SearchError) -> StatusCode {
    match error {
        SearchError::EmptyUsername => StatusCode::BAD_REQUEST,
        SearchError::Fetch(FetchError::NotFound(_)) => StatusCode::NOT_FOUND,
        SearchError::Fetch(_) | SearchError::Malformed(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_count() {
        assert_eq!(effective_count(None, 5), 5);
        assert_eq!(effective_count(Some(3), 5), 3);
        assert_eq!(effective_count(Some(0), 5), 0);
        assert_eq!(effective_count(Some(100), 5), 100);
        assert_eq!(effective_count(Some(1000), 5), MAX_COUNT);
        assert_eq!(effective_count(Some(usize::MAX), 5), MAX_COUNT);
        assert_eq!(effective_count(None, 500), MAX_COUNT);
    }

    #[test]
    fn test_status_for() {
        assert_eq!(status_for(&SearchError::EmptyUsername), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&SearchError::Fetch(FetchError::NotFound("ghost".into()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&SearchError::Fetch(FetchError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            })),
            StatusCode::BAD_GATEWAY
        );
    }
}
