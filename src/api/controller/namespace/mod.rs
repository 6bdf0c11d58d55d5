use axum::extract::{Query, State};
use axum::Json;

use crate::api::controller::utils::client_for_cluster;
use crate::api::dto::cluster_dto::{ClusterQuery, NamespaceListResponse};
use crate::app_state::AppState;
use crate::core::client::namespaces::fetch_namespace_names;
use crate::errors::AppError;

pub struct NamespaceController;

impl NamespaceController {
    pub async fn list_namespaces(
        State(state): State<AppState>,
        Query(query): Query<ClusterQuery>,
    ) -> Result<Json<NamespaceListResponse>, AppError> {
        let client = client_for_cluster(&state, query.cluster.as_deref()).await?;
        let namespaces = fetch_namespace_names(&client).await?;

        Ok(Json(NamespaceListResponse { namespaces }))
    }
}
