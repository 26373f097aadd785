use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Container, Namespace, Pod};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use pkg_constants::cluster::{LIST_PAGE_SIZE, RESOURCE_CPU, RESOURCE_MEMORY};
use pkg_types::pod::{ContainerResources, PodResources};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::Path;
use tracing::{debug, info};

use crate::source::ClusterSource;

/// [`ClusterSource`] backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeSource {
    client: Client,
}

impl KubeSource {
    /// Build a client from an explicit kubeconfig, or infer one
    /// (`$KUBECONFIG`, `~/.kube/config`, then the in-cluster service account).
    pub async fn connect(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Self> {
        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..Default::default()
        };

        let config = match kubeconfig {
            Some(path) => {
                info!("Loading kubeconfig from {}", path.display());
                let kubeconfig = Kubeconfig::read_from(path)
                    .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .with_context(|| format!("Invalid kubeconfig {}", path.display()))?
            }
            None if context.is_some() => Config::from_kubeconfig(&options)
                .await
                .context("Failed to load kubeconfig")?,
            None => Config::infer()
                .await
                .context("Failed to infer cluster configuration. Is your kubeconfig valid?")?,
        };

        info!("Connecting to cluster at {}", config.cluster_url);
        let client = Client::try_from(config).context("Failed to build cluster client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ClusterSource for KubeSource {
    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let namespaces = list_all(&api)
            .await
            .context("Failed to list namespaces. Check RBAC permissions.")?;
        debug!("Listed {} namespaces", namespaces.len());
        Ok(namespaces
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodResources>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let pods = list_all(&api)
            .await
            .with_context(|| format!("Failed to list pods in {}", namespace))?;
        debug!("Listed {} pods in {}", pods.len(), namespace);
        Ok(pods.iter().map(pod_resources).collect())
    }
}

/// List every object, following continue tokens page by page.
async fn list_all<K>(api: &Api<K>) -> Result<Vec<K>, kube::Error>
where
    K: Clone + DeserializeOwned + Debug,
{
    let mut params = ListParams::default().limit(LIST_PAGE_SIZE);
    let mut items = Vec::new();
    loop {
        let page = api.list(&params).await?;
        items.extend(page.items);
        match page.metadata.continue_ {
            Some(token) if !token.is_empty() => params = params.continue_token(&token),
            _ => break,
        }
    }
    Ok(items)
}

/// The resource view of a pod: CPU and memory requests/limits of its
/// regular containers.
pub fn pod_resources(pod: &Pod) -> PodResources {
    let containers = pod
        .spec
        .as_ref()
        .map(|spec| spec.containers.iter().map(container_resources).collect())
        .unwrap_or_default();
    PodResources {
        name: pod.metadata.name.clone().unwrap_or_default(),
        containers,
    }
}

fn container_resources(container: &Container) -> ContainerResources {
    let resources = container.resources.as_ref();
    let requests = resources.and_then(|r| r.requests.as_ref());
    let limits = resources.and_then(|r| r.limits.as_ref());

    ContainerResources {
        name: container.name.clone(),
        cpu_request: quantity(requests, RESOURCE_CPU),
        cpu_limit: quantity(limits, RESOURCE_CPU),
        memory_request: quantity(requests, RESOURCE_MEMORY),
        memory_limit: quantity(limits, RESOURCE_MEMORY),
    }
}

fn quantity(map: Option<&BTreeMap<String, Quantity>>, key: &str) -> Option<String> {
    map.and_then(|m| m.get(key)).map(|q| q.0.clone())
}
