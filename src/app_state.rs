use std::sync::Arc;

use crate::core::client::kubeconfig::KubeconfigService;

/// Shared application state. The kubeconfig service is the only long-lived
/// piece; Kubernetes clients are constructed fresh per request.
#[derive(Clone)]
pub struct AppState {
    pub kubeconfig_service: Arc<KubeconfigService>,
}

pub fn build_app_state() -> AppState {
    AppState {
        kubeconfig_service: Arc::new(KubeconfigService::new()),
    }
}
