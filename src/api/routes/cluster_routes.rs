//! Cluster routes (e.g., /api/v1/clusters)

use axum::{routing::get, Router};

use crate::api::controller::cluster::ClusterController;
use crate::app_state::AppState;

pub fn cluster_routes() -> Router<AppState> {
    Router::new().route("/clusters", get(ClusterController::list_clusters))
}
