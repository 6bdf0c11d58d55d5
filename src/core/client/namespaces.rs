use kube::api::ListParams;
use kube::{Api, Client};
use tracing::{debug, error};

use crate::core::client::kube_resources::Namespace;
use crate::errors::AppError;

/// Fetch namespace names in API order, no filtering
pub async fn fetch_namespace_names(client: &Client) -> Result<Vec<String>, AppError> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    let namespace_list = namespaces.list(&ListParams::default()).await.map_err(|err| {
        error!(%err, "Failed to list namespaces");
        AppError::K8sApiError(format!("failed to list namespaces: {err}"))
    })?;

    debug!("Discovered {} namespace(s)", namespace_list.items.len());

    let names = namespace_list
        .items
        .into_iter()
        .filter_map(|n| n.metadata.name)
        .collect();

    Ok(names)
}
