//! Hub error types with HTTP status code mapping.
//!
//! [`HubError`] is the central error type of the service. Connection-level
//! failures never surface as a `HubError`; they are absorbed where they
//! happen and only end the affected connection.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Service-level error enum.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The request reached the bid endpoint without a WebSocket upgrade.
    #[error("websocket upgrade required")]
    UpgradeRequired,

    /// The hub task has stopped and its intake is closed.
    #[error("hub is not accepting events")]
    HubUnavailable,

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HubError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UpgradeRequired => StatusCode::UPGRADE_REQUIRED,
            Self::HubUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error responses carry the status only; the endpoint has no error body.
impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "request failed");
        self.status_code().into_response()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: HubError) -> (StatusCode, usize) {
        let response = err.into_response();
        let status = response.status();
        let Ok(body) = to_bytes(response.into_body(), 1024).await else {
            panic!("body should be readable");
        };
        (status, body.len())
    }

    #[tokio::test]
    async fn upgrade_required_has_empty_body() {
        assert_eq!(
            render(HubError::UpgradeRequired).await,
            (StatusCode::UPGRADE_REQUIRED, 0)
        );
    }

    #[tokio::test]
    async fn other_variants_map_to_server_statuses() {
        assert_eq!(
            render(HubError::HubUnavailable).await,
            (StatusCode::SERVICE_UNAVAILABLE, 0)
        );
        assert_eq!(
            render(HubError::InvalidConfig("x".to_string())).await,
            (StatusCode::INTERNAL_SERVER_ERROR, 0)
        );
    }
}
