use anyhow::Result;
use async_trait::async_trait;
use pkg_types::pod::PodResources;

/// Where namespaces and pods come from.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// Namespace names, in report order.
    /// An error here is fatal: there is nothing to report without them.
    async fn list_namespaces(&self) -> Result<Vec<String>>;

    /// The pods of one namespace.
    /// An error here only affects that namespace.
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodResources>>;
}
