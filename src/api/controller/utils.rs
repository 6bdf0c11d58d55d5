use kube::Client;

use crate::app_state::AppState;
use crate::errors::AppError;

/// Resolve the target cluster and build a fresh client for it.
///
/// An explicit `cluster` query parameter wins; otherwise the current-context
/// cluster is used. In-cluster mode ignores the name entirely.
pub async fn client_for_cluster(
    state: &AppState,
    cluster: Option<&str>,
) -> Result<Client, AppError> {
    let service = &state.kubeconfig_service;

    let name = match cluster {
        Some(name) if !name.is_empty() => name.to_string(),
        _ if service.is_in_cluster() => String::new(),
        _ => service.current_cluster()?,
    };

    service.build_client(&name).await
}
