// Kube-rs based Kubernetes client
pub mod kube_resources;
pub mod kubeconfig;
pub mod mappers;
pub mod namespaces;
pub mod pods;
pub mod selector;

#[cfg(test)]
pub(crate) mod test_support;
