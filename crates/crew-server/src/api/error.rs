use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crew_core::ErrorKind;
use serde::Serialize;

/// API-layer error type
#[derive(Debug)]
pub enum ApiError {
    /// 422 - Input rejected before any research started
    Validation(String),

    /// 502 - A data provider or the model failed
    Upstream { error: ErrorKind, message: String },

    /// 500 - Wiring or processing problem on our side
    Internal { error: ErrorKind, message: String },
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

/// HTTP status for a failed research run
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::DataUnavailable | ErrorKind::GenerationFailure => StatusCode::BAD_GATEWAY,
        ErrorKind::Configuration | ErrorKind::Processing => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match self {
            ApiError::Validation(msg) => (ErrorKind::Validation, msg),
            ApiError::Upstream { error, message } | ApiError::Internal { error, message } => {
                (error, message)
            }
        };

        let body = ErrorBody {
            error: error_type.as_str().into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

// Convert research errors to API errors
impl From<crew_core::Error> for ApiError {
    fn from(err: crew_core::Error) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match kind {
            ErrorKind::Validation => ApiError::Validation(message),
            ErrorKind::DataUnavailable | ErrorKind::GenerationFailure => ApiError::Upstream {
                error: kind,
                message,
            },
            ErrorKind::Configuration | ErrorKind::Processing => ApiError::Internal {
                error: kind,
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_core::Error;

    #[test]
    fn test_status_mapping() {
        let err: ApiError = Error::Validation("blank".into()).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = Error::data_unavailable("yahoo_finance", "ZZZZ").into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = Error::GenerationFailure("quota".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = Error::Configuration("bad".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_json_body() {
        let response = ApiError::from(Error::data_unavailable("yahoo_finance", "no data"))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "data_unavailable");
        assert!(body["message"].as_str().unwrap().contains("no data"));
    }
}
