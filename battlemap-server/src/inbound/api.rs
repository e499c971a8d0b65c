use crate::domain::models::CreateMapError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use super::handlers::ParseMapHttpRequestError;

/// A success envelope: status code plus a JSON body.
#[derive(Debug)]
pub(super) struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// The failure half of the API contract. Client mistakes map to 422,
/// everything else collapses to an opaque 500 so internals never leak.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(super) enum ApiError {
    #[error("internal server error: {0}")]
    InternalServerError(String),
    #[error("unprocessable entity: {0}")]
    UnprocessableEntity(String),
}

impl From<ParseMapHttpRequestError> for ApiError {
    fn from(error: ParseMapHttpRequestError) -> Self {
        ApiError::UnprocessableEntity(error.to_string())
    }
}

impl From<CreateMapError> for ApiError {
    fn from(error: CreateMapError) -> Self {
        match error {
            CreateMapError::InvalidRequest(cause) => {
                ApiError::UnprocessableEntity(cause.to_string())
            }
            CreateMapError::Unknown(cause) => {
                tracing::error!("{:?}\n{}", cause, cause.backtrace());
                ApiError::InternalServerError("internal server error".to_owned())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponseBody::new_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                )),
            )
                .into_response(),
            ApiError::UnprocessableEntity(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponseBody::new_error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    message,
                )),
            )
                .into_response(),
        }
    }
}

/// The JSON body wrapper shared by every API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct ApiErrorData {
    pub message: String,
}
