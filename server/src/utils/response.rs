use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::utils::pagination::Pagination;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[derive(Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub message: String,
}

pub fn success<T>(data: T) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: None,
        pagination: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn created<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: Some(message.into()),
        pagination: None,
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

pub fn paginated<T>(data: Vec<T>, pagination: Pagination) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: None,
        pagination: Some(pagination),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn message_only(message: impl Into<String>) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: true,
        data: None,
        message: Some(message.into()),
        pagination: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ApiFailure {
        success: false,
        message: message.into(),
    };
    (status, Json(body)).into_response()
}
