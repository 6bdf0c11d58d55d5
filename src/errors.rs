use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Kubeconfig unavailable: {0}")]
    ConfigUnavailable(String),

    #[error("Cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    #[error("Client construction failed: {0}")]
    ClientConstruction(String),

    #[error("K8s API error: {0}")]
    K8sApiError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Choose status codes per variant
        let status = match self {
            AppError::ConfigUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ClusterNotFound(_) => StatusCode::NOT_FOUND,
            AppError::CredentialNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ClientConstruction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::K8sApiError(_) => StatusCode::BAD_GATEWAY,
        };

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
