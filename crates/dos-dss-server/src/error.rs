//! Mapping of translation errors onto HTTP responses.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dos_dss_core::DssError;
use tracing::{debug, error};

/// Handler error; renders as `{"msg": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// The lookup against DSS failed.
    Upstream(DssError),

    /// The request itself is malformed; nothing was sent upstream.
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(DssError::NotFound { .. } | DssError::Reference { .. }) => {
                StatusCode::NOT_FOUND
            }
            Self::Upstream(DssError::Network { .. } | DssError::InvalidResponse { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Upstream(DssError::Config { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Upstream(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<DssError> for ApiError {
    fn from(err: DssError) -> Self {
        Self::Upstream(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.message();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %msg, "upstream request failed");
        } else {
            debug!(status = status.as_u16(), error = %msg, "request rejected");
        }

        (status, Json(serde_json::json!({ "msg": msg }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dos_dss_core::RecordKind;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                DssError::NotFound {
                    kind: RecordKind::DataObject,
                    id: "a".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DssError::Reference {
                    id: "a".into(),
                    message: "bad".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DssError::Network {
                    message: "HTTP 500".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                DssError::InvalidResponse {
                    message: "x".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                DssError::Config {
                    message: "x".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
        assert_eq!(
            ApiError::BadRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
