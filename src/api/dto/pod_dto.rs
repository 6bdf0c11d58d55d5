//! Pod API DTOs

use serde::{Deserialize, Serialize};

use crate::core::client::mappers::PodRecord;

#[derive(Deserialize, Debug)]
pub struct PodListQuery {
    pub cluster: Option<String>,
    pub namespace: Option<String>,
    #[serde(alias = "labelSelector", alias = "label-selector")]
    pub label_selector: Option<String>,
}

#[derive(Serialize)]
pub struct PodListResponse {
    pub pods: Vec<PodRecord>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
