//! API route declarations (e.g., /api/v1/*)

pub mod cluster_routes;
pub mod pod_routes;
