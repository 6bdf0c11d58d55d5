//! Cluster API DTOs

use serde::{Deserialize, Serialize};

use crate::core::client::kubeconfig::ClusterInfo;

#[derive(Deserialize, Debug, Default)]
pub struct ClusterQuery {
    pub cluster: Option<String>,
}

#[derive(Serialize)]
pub struct ClusterListResponse {
    /// True when running on service-account credentials, in which case the
    /// kubeconfig cluster list is inherently unavailable.
    #[serde(rename = "inCluster")]
    pub in_cluster: bool,
    pub clusters: Vec<ClusterInfo>,
}

#[derive(Serialize)]
pub struct NamespaceListResponse {
    pub namespaces: Vec<String>,
}
