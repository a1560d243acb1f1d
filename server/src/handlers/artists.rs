use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;

use crate::store;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageParams, Pagination};
use crate::utils::response::{paginated, success};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

pub async fn list_artists(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let params = PageParams::new(query.page, query.limit)?;
    let search = query.search.as_deref().filter(|s| !s.trim().is_empty());

    let page = store::artists::list(&state.pool, params, search).await?;
    Ok(paginated(page.items, Pagination::new(params, page.total)))
}

pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let artist = store::artists::find_by_id(&state.pool, id).await?;
    Ok(success(artist))
}
