//! Kubeconfig resolution and per-cluster client construction.
//!
//! The service detects once, at construction, whether the process runs inside
//! a cluster (service-account mode) or locally (kubeconfig mode). In local
//! mode the kubeconfig file is re-read from disk on every call, so each call
//! is independently consistent with the on-disk state.

use std::path::{Path, PathBuf};

use kube::config::{Context, KubeConfigOptions, Kubeconfig, NamedContext};
use kube::{Client, Config};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;

/// Conventional mount path for service-account credentials inside a pod.
const SERVICE_ACCOUNT_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// A cluster entry from the kubeconfig, for UI display and selection.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterInfo {
    pub name: String,
    pub current: bool,
}

/// Handles kubeconfig operations and client construction.
pub struct KubeconfigService {
    in_cluster: bool,
    kubeconfig_path: Option<PathBuf>,
}

impl KubeconfigService {
    pub fn new() -> Self {
        let in_cluster = Path::new(SERVICE_ACCOUNT_TOKEN_PATH).exists();

        let kubeconfig_path = if in_cluster {
            None
        } else {
            default_kubeconfig_path()
        };

        Self {
            in_cluster,
            kubeconfig_path,
        }
    }

    /// Build a service backed by an explicit kubeconfig file.
    #[allow(dead_code)]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            in_cluster: false,
            kubeconfig_path: Some(path.into()),
        }
    }

    /// True when running inside a Kubernetes cluster.
    pub fn is_in_cluster(&self) -> bool {
        self.in_cluster
    }

    /// List the clusters declared in the kubeconfig, sorted by name with the
    /// current cluster first. Exactly one entry is marked current when the
    /// current context resolves.
    pub fn list_clusters(&self) -> Result<Vec<ClusterInfo>, AppError> {
        let config = self.load()?;
        let current_cluster = current_cluster_of(&config);

        // Unique cluster names, first occurrence wins
        let mut clusters: Vec<ClusterInfo> = Vec::new();
        for named in &config.clusters {
            if clusters.iter().any(|c| c.name == named.name) {
                continue;
            }
            clusters.push(ClusterInfo {
                current: named.name == current_cluster,
                name: named.name.clone(),
            });
        }

        // Alphabetical, but the current cluster always sorts first
        clusters.sort_by(|a, b| b.current.cmp(&a.current).then_with(|| a.name.cmp(&b.name)));

        Ok(clusters)
    }

    /// Name of the current context; empty when unset.
    #[allow(dead_code)]
    pub fn current_context(&self) -> Result<String, AppError> {
        let config = self.load()?;
        Ok(config.current_context.unwrap_or_default())
    }

    /// Cluster referenced by the current context; empty when the current
    /// context is unset or dangling.
    pub fn current_cluster(&self) -> Result<String, AppError> {
        let config = self.load()?;
        Ok(current_cluster_of(&config))
    }

    /// Create a client for the named cluster. In-cluster mode ignores the
    /// name and uses the mounted service-account credentials.
    pub async fn build_client(&self, cluster_name: &str) -> Result<Client, AppError> {
        if self.in_cluster {
            let config = Config::incluster().map_err(|err| {
                AppError::ClientConstruction(format!("failed to get in-cluster config: {err}"))
            })?;
            return Client::try_from(config).map_err(|err| {
                AppError::ClientConstruction(format!("failed to create in-cluster client: {err}"))
            });
        }

        let config = self.load()?;

        let cluster = config
            .clusters
            .iter()
            .find(|c| c.name == cluster_name)
            .cloned()
            .ok_or_else(|| {
                AppError::ClusterNotFound(format!(
                    "cluster {cluster_name:?} not found in kubeconfig"
                ))
            })?;

        let user_name = best_user_for_cluster(&config, cluster_name)?;

        let auth_info = config
            .auth_infos
            .iter()
            .find(|a| a.name == user_name)
            .cloned()
            .ok_or_else(|| {
                AppError::CredentialNotFound(format!(
                    "user {user_name:?} not found in kubeconfig users"
                ))
            })?;

        // Synthesize a virtual context pairing exactly this cluster and user,
        // isolating the client from any other context in the file.
        let virtual_context = NamedContext {
            name: "virtual".to_string(),
            context: Some(Context {
                cluster: cluster_name.to_string(),
                user: Some(user_name.clone()),
                ..Context::default()
            }),
        };

        let stripped = Kubeconfig {
            clusters: vec![cluster],
            auth_infos: vec![auth_info],
            contexts: vec![virtual_context],
            current_context: Some("virtual".to_string()),
            ..Kubeconfig::default()
        };

        let rest_config = Config::from_custom_kubeconfig(
            stripped,
            &KubeConfigOptions {
                context: Some("virtual".to_string()),
                ..Default::default()
            },
        )
        .await
        .map_err(|err| {
            AppError::ClientConstruction(format!(
                "failed to create client config for cluster {cluster_name:?} (user {user_name:?}): {err}"
            ))
        })?;

        let client = Client::try_from(rest_config).map_err(|err| {
            AppError::ClientConstruction(format!(
                "failed to create client for cluster {cluster_name:?} (user {user_name:?}): {err}"
            ))
        })?;

        info!(cluster = cluster_name, user = %user_name, "Created Kubernetes client for cluster");
        Ok(client)
    }

    fn load(&self) -> Result<Kubeconfig, AppError> {
        if self.in_cluster {
            return Err(AppError::ConfigUnavailable(
                "not available when running in cluster".to_string(),
            ));
        }

        let path = self.kubeconfig_path.as_ref().ok_or_else(|| {
            AppError::ConfigUnavailable("kubeconfig path not found".to_string())
        })?;

        debug!(path = %path.display(), "Loading kubeconfig");
        Kubeconfig::read_from(path).map_err(|err| {
            AppError::ConfigUnavailable(format!("failed to load kubeconfig: {err}"))
        })
    }
}

impl Default for KubeconfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Respects KUBECONFIG (first entry), then ~/.kube/config.
fn default_kubeconfig_path() -> Option<PathBuf> {
    let sep = if cfg!(windows) { ';' } else { ':' };

    std::env::var("KUBECONFIG")
        .ok()
        .and_then(|v| v.split(sep).next().map(|s| PathBuf::from(s.trim())))
        .or_else(|| dirs::home_dir().map(|h| h.join(".kube").join("config")))
}

/// Cluster referenced by the current context, or empty when unset/dangling.
fn current_cluster_of(config: &Kubeconfig) -> String {
    let Some(current) = config.current_context.as_deref().filter(|c| !c.is_empty()) else {
        return String::new();
    };

    config
        .contexts
        .iter()
        .find(|c| c.name == current)
        .and_then(|c| c.context.as_ref())
        .map(|c| c.cluster.clone())
        .unwrap_or_default()
}

/// Pick the user most commonly paired with the cluster across contexts.
/// Tallying runs in declared order and ties go to the first user seen, so the
/// choice is reproducible for a given file.
fn best_user_for_cluster(config: &Kubeconfig, cluster_name: &str) -> Result<String, AppError> {
    let mut tallies: Vec<(String, usize)> = Vec::new();

    for named in &config.contexts {
        let Some(context) = named.context.as_ref() else {
            continue;
        };
        if context.cluster != cluster_name {
            continue;
        }
        let Some(user) = context.user.as_deref().filter(|u| !u.is_empty()) else {
            continue;
        };

        match tallies.iter_mut().find(|(name, _)| name == user) {
            Some((_, count)) => *count += 1,
            None => tallies.push((user.to_string(), 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (user, count) in tallies {
        match &best {
            Some((_, max)) if count <= *max => {}
            _ => best = Some((user, count)),
        }
    }

    best.map(|(user, _)| user).ok_or_else(|| {
        AppError::CredentialNotFound(format!("no contexts found for cluster {cluster_name:?}"))
    })
}
