use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::handlers::artists::ListQuery;
use crate::models::NewBooking;
use crate::store;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageParams, Pagination};
use crate::utils::response::{created, message_only, paginated, success};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tickets_count: Option<i32>,
    pub event_id: Option<i32>,
}

pub async fn create_booking(
    State(state): State<AppState>,
    body: Result<Json<CreateBookingBody>, JsonRejection>,
) -> Result<Response, AppError> {
    // A missing or malformed JSON body is a validation failure, not a 422.
    let Json(body) = body.map_err(|_| {
        AppError::Validation("Please provide all required fields".to_string())
    })?;

    let event_id = body
        .event_id
        .ok_or_else(|| AppError::Validation("Event id is required".to_string()))?;

    let new = NewBooking {
        name: body.name.unwrap_or_default(),
        email: body.email.unwrap_or_default(),
        phone: body.phone.unwrap_or_default(),
        tickets_count: body.tickets_count.unwrap_or(0),
        event_id,
        confirmation_code: None,
    };

    let booking = store::bookings::create(&state.pool, new).await?;
    let message = format!("Booking confirmed! Your code: {}", booking.confirmation_code);
    Ok(created(booking, message))
}

pub async fn get_booking_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    let booking = store::bookings::find_by_code(&state.pool, &code).await?;
    Ok(success(booking))
}

#[derive(Debug, Deserialize)]
pub struct EmailListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn list_bookings_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(query): Query<EmailListQuery>,
) -> Result<Response, AppError> {
    let params = PageParams::new(query.page, query.limit)?;
    let page = store::bookings::list_by_email(&state.pool, &email, params).await?;
    Ok(paginated(page.items, Pagination::new(params, page.total)))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let params = PageParams::new(query.page, query.limit)?;
    let search = query.search.as_deref().filter(|s| !s.trim().is_empty());

    let page = store::bookings::list(&state.pool, params, search).await?;
    Ok(paginated(page.items, Pagination::new(params, page.total)))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    store::bookings::delete_by_code(&state.pool, &code).await?;
    Ok(message_only("Booking cancelled successfully"))
}
