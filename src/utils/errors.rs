use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application error carrying the HTTP status it should be rendered with.
///
/// The status set at the failure site is the one that reaches the client;
/// nothing downstream rewrites it.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // `message` is the context added at the failure site, `error` the
        // underlying cause. They coincide for plain validation failures.
        let body = Json(json!({
            "status": self.status.as_u16(),
            "success": false,
            "message": self.error.to_string(),
            "error": self.error.root_cause().to_string(),
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(
            AppError::bad_request(anyhow::anyhow!("nope")).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized(anyhow::anyhow!("nope")).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::not_found(anyhow::anyhow!("nope")).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal(anyhow::anyhow!("nope")).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_blanket_from_maps_to_internal() {
        let err: AppError = std::io::Error::other("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_context_separates_message_from_cause() {
        let err = AppError::database(
            anyhow::anyhow!("connection reset").context("Failed to insert user"),
        );
        assert_eq!(err.error.to_string(), "Failed to insert user");
        assert_eq!(err.error.root_cause().to_string(), "connection reset");
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = AppError::not_found(anyhow::anyhow!("User not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
