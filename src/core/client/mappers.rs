/// Maps kube-rs / k8s-openapi pod objects → dashboard records
use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::core::client::kube_resources::Pod;

/// Pod information projected for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodRecord {
    pub name: String,
    pub namespace: String,
    pub image_tag: String,
    pub status: String,
    pub ready: String,
    pub restarts: i32,
    pub age: String,
    pub node: String,
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

/// Converts a k8s-openapi Pod object into a PodRecord
pub fn map_pod_to_record(pod: &Pod) -> PodRecord {
    let total_containers = pod.spec.as_ref().map(|s| s.containers.len()).unwrap_or(0);

    let container_statuses = pod
        .status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref());

    let ready_containers = container_statuses
        .map(|statuses| statuses.iter().filter(|s| s.ready).count())
        .unwrap_or(0);

    let restarts: i32 = container_statuses
        .map(|statuses| statuses.iter().map(|s| s.restart_count).sum())
        .unwrap_or(0);

    let age = pod
        .metadata
        .creation_timestamp
        .as_ref()
        .map(|ts| format_age((Utc::now() - ts.0).num_seconds()))
        .unwrap_or_default();

    PodRecord {
        name: pod.metadata.name.clone().unwrap_or_default(),
        namespace: pod.metadata.namespace.clone().unwrap_or_default(),
        image_tag: pod_image_tag(pod),
        status: pod_status(pod),
        ready: format!("{ready_containers}/{total_containers}"),
        restarts,
        age,
        node: pod
            .spec
            .as_ref()
            .and_then(|s| s.node_name.clone())
            .unwrap_or_default(),
        ip: pod
            .status
            .as_ref()
            .and_then(|s| s.pod_ip.clone())
            .unwrap_or_default(),
        labels: pod.metadata.labels.clone(),
    }
}

/// Returns the most accurate display status for a pod by checking container
/// states. This provides more detail than the coarse phase alone (e.g.
/// CrashLoopBackOff, ImagePullBackOff).
///
/// Init containers are inspected before regular containers, in declaration
/// order, first match wins. Zero-exit terminations are expected steady state
/// and never reported.
pub fn pod_status(pod: &Pod) -> String {
    // A deletion timestamp wins over everything else
    if pod.metadata.deletion_timestamp.is_some() {
        return "Terminating".to_string();
    }

    let status = pod.status.as_ref();
    let phase = status.and_then(|s| s.phase.clone()).unwrap_or_default();

    if phase == "Running" || phase == "Pending" {
        if let Some(init_statuses) = status.and_then(|s| s.init_container_statuses.as_ref()) {
            for container_status in init_statuses {
                let Some(state) = container_status.state.as_ref() else {
                    continue;
                };
                if let Some(reason) = state
                    .waiting
                    .as_ref()
                    .and_then(|w| w.reason.as_deref())
                    .filter(|r| !r.is_empty())
                {
                    return reason.to_string();
                }
                if let Some(terminated) = state.terminated.as_ref() {
                    if terminated.exit_code != 0 {
                        return terminated
                            .reason
                            .clone()
                            .filter(|r| !r.is_empty())
                            .unwrap_or_else(|| "InitError".to_string());
                    }
                }
            }
        }

        if let Some(container_statuses) = status.and_then(|s| s.container_statuses.as_ref()) {
            for container_status in container_statuses {
                let Some(state) = container_status.state.as_ref() else {
                    continue;
                };
                // Waiting state (e.g. CrashLoopBackOff, ContainerCreating)
                if let Some(reason) = state
                    .waiting
                    .as_ref()
                    .and_then(|w| w.reason.as_deref())
                    .filter(|r| !r.is_empty())
                {
                    return reason.to_string();
                }
                // Terminated with non-zero exit; a clean exit covers sidecars
                // that completed and is not reported
                if let Some(terminated) = state.terminated.as_ref() {
                    if terminated.exit_code != 0 {
                        return terminated
                            .reason
                            .clone()
                            .filter(|r| !r.is_empty())
                            .unwrap_or_else(|| "Error".to_string());
                    }
                }
            }
        }
    }

    phase
}

/// Extracts the image tag from the first container's image reference.
fn pod_image_tag(pod: &Pod) -> String {
    let Some(first) = pod.spec.as_ref().and_then(|s| s.containers.first()) else {
        return "unknown".to_string();
    };
    image_tag(first.image.as_deref().unwrap_or_default())
}

/// Tag of an image reference, or "latest" when none is specified. A colon
/// followed by a path segment belongs to a registry host:port, not a tag.
pub fn image_tag(image: &str) -> String {
    let Some(last_colon) = image.rfind(':') else {
        return "latest".to_string();
    };

    let after_colon = &image[last_colon + 1..];
    if after_colon.contains('/') {
        return "latest".to_string();
    }

    let tag = after_colon.trim();
    if tag.is_empty() {
        "latest".to_string()
    } else {
        tag.to_string()
    }
}

/// Renders an elapsed duration as its largest whole unit, truncated.
pub fn format_age(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h", seconds / 3600)
    } else {
        format!("{}d", seconds / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use k8s_openapi::api::core::v1::{
        Container, ContainerState, ContainerStateTerminated, ContainerStateWaiting,
        ContainerStatus, PodSpec, PodStatus,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};

    fn container(image: &str) -> Container {
        Container {
            name: "main".to_string(),
            image: Some(image.to_string()),
            ..Default::default()
        }
    }

    fn waiting_status(reason: &str) -> ContainerStatus {
        ContainerStatus {
            name: "main".to_string(),
            state: Some(ContainerState {
                waiting: Some(ContainerStateWaiting {
                    reason: Some(reason.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn terminated_status(exit_code: i32, reason: Option<&str>) -> ContainerStatus {
        ContainerStatus {
            name: "main".to_string(),
            state: Some(ContainerState {
                terminated: Some(ContainerStateTerminated {
                    exit_code,
                    reason: reason.map(str::to_string),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn ready_status() -> ContainerStatus {
        ContainerStatus {
            name: "main".to_string(),
            ready: true,
            restart_count: 0,
            ..Default::default()
        }
    }

    fn running_pod() -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some("web-0".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            spec: Some(PodSpec {
                containers: vec![container("nginx:1.25")],
                ..Default::default()
            }),
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                container_statuses: Some(vec![ready_status()]),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn image_tag_extraction() {
        assert_eq!(image_tag("nginx:1.25"), "1.25");
        assert_eq!(image_tag("myregistry.io:5000/app"), "latest");
        assert_eq!(image_tag("app"), "latest");
        assert_eq!(image_tag("app:"), "latest");
        assert_eq!(image_tag("myregistry.io:5000/app:v2"), "v2");
    }

    #[test]
    fn age_formatting() {
        assert_eq!(format_age(45), "45s");
        assert_eq!(format_age(90), "1m");
        assert_eq!(format_age(59 * 60), "59m");
        assert_eq!(format_age(25 * 3600), "1d");
        assert_eq!(format_age(3 * 86400 + 7200), "3d");
        assert_eq!(format_age(0), "0s");
    }

    #[test]
    fn waiting_reason_overrides_running_phase() {
        let mut pod = running_pod();
        pod.status.as_mut().unwrap().container_statuses =
            Some(vec![waiting_status("CrashLoopBackOff")]);
        assert_eq!(pod_status(&pod), "CrashLoopBackOff");
    }

    #[test]
    fn clean_init_completion_is_suppressed() {
        let mut pod = running_pod();
        pod.status.as_mut().unwrap().init_container_statuses =
            Some(vec![terminated_status(0, Some("Completed"))]);
        assert_eq!(pod_status(&pod), "Running");
    }

    #[test]
    fn failed_init_container_overrides() {
        let mut pod = running_pod();
        pod.status.as_mut().unwrap().init_container_statuses =
            Some(vec![terminated_status(1, None)]);
        assert_eq!(pod_status(&pod), "InitError");

        pod.status.as_mut().unwrap().init_container_statuses =
            Some(vec![terminated_status(1, Some("OOMKilled"))]);
        assert_eq!(pod_status(&pod), "OOMKilled");
    }

    #[test]
    fn init_containers_are_checked_before_regular_ones() {
        let mut pod = running_pod();
        let status = pod.status.as_mut().unwrap();
        status.init_container_statuses = Some(vec![waiting_status("PodInitializing")]);
        status.container_statuses = Some(vec![waiting_status("ContainerCreating")]);
        assert_eq!(pod_status(&pod), "PodInitializing");
    }

    #[test]
    fn terminated_regular_container_with_nonzero_exit() {
        let mut pod = running_pod();
        pod.status.as_mut().unwrap().container_statuses = Some(vec![terminated_status(137, None)]);
        assert_eq!(pod_status(&pod), "Error");
    }

    #[test]
    fn clean_sidecar_exit_is_suppressed() {
        let mut pod = running_pod();
        pod.status.as_mut().unwrap().container_statuses =
            Some(vec![terminated_status(0, Some("Completed")), ready_status()]);
        assert_eq!(pod_status(&pod), "Running");
    }

    #[test]
    fn deletion_timestamp_wins() {
        let mut pod = running_pod();
        pod.metadata.deletion_timestamp = Some(Time(Utc::now()));
        pod.status.as_mut().unwrap().container_statuses =
            Some(vec![waiting_status("CrashLoopBackOff")]);
        assert_eq!(pod_status(&pod), "Terminating");
    }

    #[test]
    fn succeeded_phase_passes_through() {
        let mut pod = running_pod();
        let status = pod.status.as_mut().unwrap();
        status.phase = Some("Succeeded".to_string());
        // Container states are not consulted outside Pending/Running
        status.container_statuses = Some(vec![terminated_status(1, Some("Error"))]);
        assert_eq!(pod_status(&pod), "Succeeded");
    }

    #[test]
    fn record_projection_covers_ready_restarts_and_age() {
        let mut pod = running_pod();
        pod.metadata.creation_timestamp = Some(Time(Utc::now() - Duration::seconds(90)));
        pod.spec.as_mut().unwrap().containers.push(container("busybox"));
        pod.spec.as_mut().unwrap().node_name = Some("node-a".to_string());

        let status = pod.status.as_mut().unwrap();
        status.pod_ip = Some("10.0.0.7".to_string());
        status.container_statuses = Some(vec![
            ready_status(),
            ContainerStatus {
                name: "sidecar".to_string(),
                ready: false,
                restart_count: 3,
                ..Default::default()
            },
        ]);

        let record = map_pod_to_record(&pod);
        assert_eq!(record.name, "web-0");
        assert_eq!(record.namespace, "default");
        assert_eq!(record.image_tag, "1.25");
        assert_eq!(record.ready, "1/2");
        assert_eq!(record.restarts, 3);
        assert_eq!(record.age, "1m");
        assert_eq!(record.node, "node-a");
        assert_eq!(record.ip, "10.0.0.7");
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = map_pod_to_record(&running_pod());
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("imageTag").is_some());
        assert!(value.get("image_tag").is_none());
        // Absent labels are omitted from the wire format
        assert!(value.get("labels").is_none());
    }
}
