use axum::extract::State;
use axum::Json;

use crate::api::dto::cluster_dto::ClusterListResponse;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct ClusterController;

impl ClusterController {
    /// List clusters declared in the kubeconfig. In-cluster mode answers with
    /// an empty list and `inCluster: true` rather than an error.
    pub async fn list_clusters(
        State(state): State<AppState>,
    ) -> Result<Json<ClusterListResponse>, AppError> {
        if state.kubeconfig_service.is_in_cluster() {
            return Ok(Json(ClusterListResponse {
                in_cluster: true,
                clusters: Vec::new(),
            }));
        }

        let clusters = state.kubeconfig_service.list_clusters()?;
        Ok(Json(ClusterListResponse {
            in_cluster: false,
            clusters,
        }))
    }
}
