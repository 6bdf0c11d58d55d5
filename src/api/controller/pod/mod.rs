use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::controller::utils::client_for_cluster;
use crate::api::dto::cluster_dto::ClusterQuery;
use crate::api::dto::pod_dto::{MessageResponse, PodListQuery, PodListResponse};
use crate::app_state::AppState;
use crate::core::client::pods;
use crate::errors::AppError;

pub struct PodController;

impl PodController {
    /// List pods – optionally filter by `namespace` (default "default", "all"
    /// for every namespace) and `labelSelector` (supports the `=~` regex
    /// operator)
    pub async fn list_pods(
        State(state): State<AppState>,
        Query(query): Query<PodListQuery>,
    ) -> Result<Json<PodListResponse>, AppError> {
        let client = client_for_cluster(&state, query.cluster.as_deref()).await?;

        let namespace = query.namespace.as_deref().unwrap_or("default");
        let label_selector = query.label_selector.as_deref().unwrap_or("");

        let pods = pods::fetch_pods(&client, namespace, label_selector).await?;
        Ok(Json(PodListResponse { pods }))
    }

    pub async fn delete_pod(
        State(state): State<AppState>,
        Path((namespace, name)): Path<(String, String)>,
        Query(query): Query<ClusterQuery>,
    ) -> Result<Json<MessageResponse>, AppError> {
        let client = client_for_cluster(&state, query.cluster.as_deref()).await?;

        pods::delete_pod(&client, &namespace, &name).await?;
        Ok(Json(MessageResponse {
            message: "Pod deleted successfully".to_string(),
        }))
    }
}
