use anyhow::Result;
use futures_util::stream::{self, StreamExt};
use pkg_report::report_namespace;
use pkg_types::namespace::NamespaceReport;
use tracing::{info, warn};

use crate::source::ClusterSource;

/// Gather one report entry per namespace.
///
/// With an empty `namespaces` list every namespace in the cluster is
/// reported; otherwise exactly the given ones, in the given order. Pods are
/// listed for up to `concurrency` namespaces at a time, but the entries come
/// back in namespace order regardless of which call finishes first.
///
/// Only a failure to list namespaces is returned as an error. A namespace
/// whose pods cannot be listed or summed becomes [`NamespaceReport::Failed`].
pub async fn collect<S>(
    source: &S,
    namespaces: &[String],
    concurrency: usize,
) -> Result<Vec<NamespaceReport>>
where
    S: ClusterSource + ?Sized,
{
    let namespaces = if namespaces.is_empty() {
        source.list_namespaces().await?
    } else {
        namespaces.to_vec()
    };
    let concurrency = concurrency.max(1);
    info!(
        "Collecting {} namespaces, {} at a time",
        namespaces.len(),
        concurrency
    );

    let reports = stream::iter(namespaces)
        .map(|namespace| async move {
            let report = match source.list_pods(&namespace).await {
                Ok(pods) => report_namespace(&namespace, &pods),
                Err(e) => NamespaceReport::failed(namespace.as_str(), format!("{:#}", e)),
            };
            if let NamespaceReport::Failed { reason, .. } = &report {
                warn!("Namespace {}: {}", namespace, reason);
            }
            report
        })
        .buffered(concurrency)
        .collect::<Vec<_>>()
        .await;

    Ok(reports)
}
