use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `x-api-key` header does not equal the project key.
/// Missing header → 401, wrong value → 403.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Forbidden)?;

    if provided != state.config.project_key {
        tracing::warn!("Rejected request to {} with invalid API key", req.uri().path());
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}
