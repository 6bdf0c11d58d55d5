pub mod cluster_dto;
pub mod pod_dto;
