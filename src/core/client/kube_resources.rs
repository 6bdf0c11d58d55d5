/// Re-export commonly used Kubernetes resource types from k8s-openapi
/// This module provides a centralized place for all K8s resource types

pub use k8s_openapi::api::core::v1::{Namespace, Pod};
