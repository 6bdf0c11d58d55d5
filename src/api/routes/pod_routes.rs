//! Pod and namespace routes (e.g., /api/v1/pods)

use axum::{
    routing::{delete, get},
    Router,
};

use crate::api::controller::namespace::NamespaceController;
use crate::api::controller::pod::PodController;
use crate::app_state::AppState;

pub fn pod_routes() -> Router<AppState> {
    Router::new()
        .route("/namespaces", get(NamespaceController::list_namespaces))
        .route("/pods", get(PodController::list_pods))
        .route(
            "/pods/{namespace}/{name}",
            delete(PodController::delete_pod),
        )
}
