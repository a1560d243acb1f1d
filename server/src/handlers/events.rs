use axum::extract::State;
use axum::response::Response;

use crate::store;
use crate::utils::error::AppError;
use crate::utils::response::success;
use crate::AppState;

pub async fn get_event(State(state): State<AppState>) -> Result<Response, AppError> {
    let event = store::events::find_current(&state.pool).await?;
    Ok(success(event))
}

pub async fn get_event_stats(State(state): State<AppState>) -> Result<Response, AppError> {
    let stats = store::events::stats(&state.pool).await?;
    Ok(success(stats))
}
