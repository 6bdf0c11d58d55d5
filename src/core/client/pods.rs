use kube::api::{DeleteParams, ListParams};
use kube::{Api, Client};
use tracing::{debug, error, info};

use crate::core::client::kube_resources::Pod;
use crate::core::client::mappers::{map_pod_to_record, PodRecord};
use crate::core::client::selector;
use crate::errors::AppError;

/// Namespace sentinel meaning "no namespace restriction".
pub const ALL_NAMESPACES: &str = "all";

fn pod_api(client: &Client, namespace: &str) -> Api<Pod> {
    if namespace == ALL_NAMESPACES {
        Api::all(client.clone())
    } else {
        Api::namespaced(client.clone(), namespace)
    }
}

/// Fetch pods in a namespace with an optional label selector.
///
/// Selectors containing the `=~` operator are evaluated locally against the
/// unfiltered list; plain selectors are delegated to the API.
pub async fn fetch_pods(
    client: &Client,
    namespace: &str,
    label_selector: &str,
) -> Result<Vec<PodRecord>, AppError> {
    let pods = pod_api(client, namespace);

    let regex_selector = selector::is_regex_selector(label_selector);
    let params = if regex_selector || label_selector.is_empty() {
        ListParams::default()
    } else {
        ListParams::default().labels(label_selector)
    };

    let pod_list = pods.list(&params).await.map_err(|err| {
        error!(%err, namespace, label_selector, "Failed to list pods");
        AppError::K8sApiError(format!("failed to list pods: {err}"))
    })?;

    debug!(
        "Discovered {} pod(s) in namespace '{}'",
        pod_list.items.len(),
        namespace
    );

    let records = pod_list
        .items
        .iter()
        .filter(|pod| {
            !regex_selector
                || selector::matches_selector(pod.metadata.labels.as_ref(), label_selector)
        })
        .map(map_pod_to_record)
        .collect();

    Ok(records)
}

/// Delete a pod by name. Success means the API accepted the delete request,
/// not that the pod is gone.
pub async fn delete_pod(client: &Client, namespace: &str, name: &str) -> Result<(), AppError> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);

    pods.delete(name, &DeleteParams::foreground())
        .await
        .map_err(|err| {
            error!(%err, namespace, pod = name, "Failed to delete pod");
            AppError::K8sApiError(format!("failed to delete pod {namespace}/{name}: {err}"))
        })?;

    info!(namespace, pod = name, "Pod deleted");
    Ok(())
}
