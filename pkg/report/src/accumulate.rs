use pkg_quantity::{Cpu, Dimension, Memory, ParseQuantityError, Quantity};
use pkg_types::namespace::{NamespaceReport, NamespaceTotals};
use pkg_types::pod::{ContainerResources, PodResources};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// One of the four tracked request/limit values of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    CpuRequest,
    CpuLimit,
    MemoryRequest,
    MemoryLimit,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::CpuRequest => write!(f, "cpu request"),
            Slot::CpuLimit => write!(f, "cpu limit"),
            Slot::MemoryRequest => write!(f, "memory request"),
            Slot::MemoryLimit => write!(f, "memory limit"),
        }
    }
}

/// Why a namespace's totals could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccumulateError {
    #[error("pod {pod:?} container {container:?}: invalid {slot}: {source}")]
    InvalidQuantity {
        pod: String,
        container: String,
        slot: Slot,
        #[source]
        source: ParseQuantityError,
    },

    #[error("pod {pod:?} container {container:?}: negative {slot} {value:?}")]
    Negative {
        pod: String,
        container: String,
        slot: Slot,
        value: String,
    },

    #[error("pod {pod:?} container {container:?}: total {slot} overflowed")]
    Overflow {
        pod: String,
        container: String,
        slot: Slot,
    },
}

/// Fold every container of every pod into the four namespace totals.
///
/// Absent values add nothing. Totals are plain integer sums of nano-units, so
/// the result does not depend on pod or container order.
pub fn accumulate(
    namespace: &str,
    pods: &[PodResources],
) -> Result<NamespaceTotals, AccumulateError> {
    let mut totals = NamespaceTotals::new(namespace);

    for pod in pods {
        for container in &pod.containers {
            add_container(&mut totals, pod, container)?;
        }
        totals.pods += 1;
    }

    debug!(
        "Namespace {}: {} pods, {} containers, cpu {}/{}, memory {}/{}",
        namespace,
        totals.pods,
        totals.containers,
        totals.cpu_requests,
        totals.cpu_limits,
        totals.memory_requests,
        totals.memory_limits
    );
    Ok(totals)
}

/// Accumulate one namespace, turning a failure into [`NamespaceReport::Failed`]
/// so the rest of the report can still be rendered.
pub fn report_namespace(namespace: &str, pods: &[PodResources]) -> NamespaceReport {
    match accumulate(namespace, pods) {
        Ok(totals) => NamespaceReport::Totals(totals),
        Err(e) => NamespaceReport::failed(namespace, e),
    }
}

fn add_container(
    totals: &mut NamespaceTotals,
    pod: &PodResources,
    container: &ContainerResources,
) -> Result<(), AccumulateError> {
    let source = SlotSource { pod, container };
    source.add::<Cpu>(
        &mut totals.cpu_requests,
        Slot::CpuRequest,
        container.cpu_request.as_deref(),
    )?;
    source.add::<Cpu>(
        &mut totals.cpu_limits,
        Slot::CpuLimit,
        container.cpu_limit.as_deref(),
    )?;
    source.add::<Memory>(
        &mut totals.memory_requests,
        Slot::MemoryRequest,
        container.memory_request.as_deref(),
    )?;
    source.add::<Memory>(
        &mut totals.memory_limits,
        Slot::MemoryLimit,
        container.memory_limit.as_deref(),
    )?;
    totals.containers += 1;
    Ok(())
}

/// Where a value came from, for error messages.
struct SlotSource<'a> {
    pod: &'a PodResources,
    container: &'a ContainerResources,
}

impl SlotSource<'_> {
    fn add<D: Dimension>(
        &self,
        total: &mut Quantity<D>,
        slot: Slot,
        raw: Option<&str>,
    ) -> Result<(), AccumulateError> {
        let Some(raw) = raw else {
            return Ok(());
        };
        let value = Quantity::<D>::parse(raw).map_err(|source| AccumulateError::InvalidQuantity {
            pod: self.pod.name.clone(),
            container: self.container.name.clone(),
            slot,
            source,
        })?;
        if value.is_negative() {
            return Err(AccumulateError::Negative {
                pod: self.pod.name.clone(),
                container: self.container.name.clone(),
                slot,
                value: raw.to_string(),
            });
        }
        *total = total
            .checked_add(value)
            .ok_or_else(|| AccumulateError::Overflow {
                pod: self.pod.name.clone(),
                container: self.container.name.clone(),
                slot,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(name: &str, cpu: (&str, &str), memory: (&str, &str)) -> ContainerResources {
        ContainerResources::new(name)
            .with_cpu(cpu.0, cpu.1)
            .with_memory(memory.0, memory.1)
    }

    fn sample_pods() -> Vec<PodResources> {
        vec![
            PodResources::new(
                "web-1",
                vec![
                    container("app", ("100m", "200m"), ("64Mi", "128Mi")),
                    container("sidecar", ("50m", "0.1"), ("32Mi", "64Mi")),
                ],
            ),
            PodResources::new(
                "web-2",
                vec![container("app", ("0.25", "1"), ("1Gi", "1536Mi"))],
            ),
            PodResources::new(
                "job",
                vec![ContainerResources {
                    cpu_request: Some("1500m".to_string()),
                    memory_limit: Some("100M".to_string()),
                    ..ContainerResources::new("worker")
                }],
            ),
        ]
    }

    #[test]
    fn test_single_container() {
        let pods = vec![PodResources::new(
            "pod",
            vec![container("app", ("100m", "200m"), ("64Mi", "128Mi"))],
        )];
        let totals = accumulate("default", &pods).unwrap();

        assert_eq!(totals.name, "default");
        assert_eq!(totals.cpu_requests, Quantity::from_millicores(100));
        assert_eq!(totals.cpu_limits, Quantity::from_millicores(200));
        assert_eq!(totals.memory_requests, Quantity::from_bytes(64 << 20));
        assert_eq!(totals.memory_limits, Quantity::from_bytes(128 << 20));
        assert_eq!(totals.cpu_requests.to_string(), "100m");
        assert_eq!(totals.memory_limits.to_string(), "128Mi");
        assert_eq!(totals.pods, 1);
        assert_eq!(totals.containers, 1);
    }

    #[test]
    fn test_mixed_units_sum_exactly() {
        let totals = accumulate("web", &sample_pods()).unwrap();

        // 100m + 50m + 250m + 1500m
        assert_eq!(totals.cpu_requests.to_string(), "1900m");
        // 200m + 100m + 1
        assert_eq!(totals.cpu_limits.to_string(), "1300m");
        // 64Mi + 32Mi + 1Gi
        assert_eq!(totals.memory_requests.to_string(), "1120Mi");
        // 128Mi + 64Mi + 1536Mi + 100M
        assert_eq!(
            totals.memory_limits,
            Quantity::from_bytes((1728 << 20) + 100_000_000)
        );
        assert_eq!(totals.pods, 3);
        assert_eq!(totals.containers, 4);
    }

    #[test]
    fn test_order_does_not_matter() {
        let pods = sample_pods();
        let expected = accumulate("web", &pods).unwrap();

        let mut reversed = pods.clone();
        reversed.reverse();
        for pod in &mut reversed {
            pod.containers.reverse();
        }
        assert_eq!(accumulate("web", &reversed).unwrap(), expected);

        // Regrouping every container into its own pod keeps the sums.
        let flattened: Vec<PodResources> = pods
            .iter()
            .flat_map(|p| p.containers.iter().cloned())
            .map(|c| PodResources::new("single", vec![c]))
            .collect();
        let regrouped = accumulate("web", &flattened).unwrap();
        assert_eq!(regrouped.cpu_requests, expected.cpu_requests);
        assert_eq!(regrouped.cpu_limits, expected.cpu_limits);
        assert_eq!(regrouped.memory_requests, expected.memory_requests);
        assert_eq!(regrouped.memory_limits, expected.memory_limits);
    }

    #[test]
    fn test_absent_values_contribute_zero() {
        let totals = accumulate("empty-ns", &[]).unwrap();
        assert!(totals.cpu_requests.is_zero());
        assert!(totals.memory_limits.is_zero());
        assert_eq!(totals.cpu_requests.to_string(), "0");

        let pods = vec![
            PodResources::new("no-containers", vec![]),
            PodResources::new("bare", vec![ContainerResources::new("app")]),
        ];
        let totals = accumulate("bare-ns", &pods).unwrap();
        assert!(totals.cpu_requests.is_zero());
        assert!(totals.cpu_limits.is_zero());
        assert!(totals.memory_requests.is_zero());
        assert!(totals.memory_limits.is_zero());
        assert_eq!(totals.pods, 2);
        assert_eq!(totals.containers, 1);
    }

    #[test]
    fn test_many_small_values_do_not_drift() {
        let pods: Vec<PodResources> = (0..10_000)
            .map(|i| {
                PodResources::new(
                    format!("pod-{}", i),
                    vec![container("app", ("1m", "0.001"), ("1Ki", "0.5Ki"))],
                )
            })
            .collect();
        let totals = accumulate("busy", &pods).unwrap();
        assert_eq!(totals.cpu_requests.to_string(), "10");
        assert_eq!(totals.cpu_limits.to_string(), "10");
        assert_eq!(totals.memory_requests, Quantity::from_bytes(10_000 * 1024));
        assert_eq!(totals.memory_limits, Quantity::from_bytes(10_000 * 512));
    }

    #[test]
    fn test_invalid_quantity_is_reported() {
        let pods = vec![PodResources::new(
            "web-1",
            vec![ContainerResources {
                cpu_request: Some("lots".to_string()),
                ..ContainerResources::new("app")
            }],
        )];
        let err = accumulate("default", &pods).unwrap_err();
        assert!(matches!(
            err,
            AccumulateError::InvalidQuantity {
                slot: Slot::CpuRequest,
                ..
            }
        ));
        let msg = err.to_string();
        assert!(msg.contains("web-1"), "got: {}", msg);
        assert!(msg.contains("app"), "got: {}", msg);
        assert!(msg.contains("cpu request"), "got: {}", msg);
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let pods = vec![PodResources::new(
            "web-1",
            vec![ContainerResources {
                memory_limit: Some("-1Gi".to_string()),
                ..ContainerResources::new("app")
            }],
        )];
        let err = accumulate("default", &pods).unwrap_err();
        assert_eq!(
            err,
            AccumulateError::Negative {
                pod: "web-1".to_string(),
                container: "app".to_string(),
                slot: Slot::MemoryLimit,
                value: "-1Gi".to_string(),
            }
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        // 5 * 10^28 cores fits three times over; the fourth overflows.
        let near_max = ContainerResources {
            cpu_limit: Some("50000000000E".to_string()),
            ..ContainerResources::new("app")
        };
        let pods: Vec<PodResources> = ["a", "b", "c", "d"]
            .iter()
            .map(|name| PodResources::new(*name, vec![near_max.clone()]))
            .collect();
        assert!(accumulate("greedy", &pods[..3]).is_ok());

        let err = accumulate("greedy", &pods).unwrap_err();
        assert_eq!(
            err,
            AccumulateError::Overflow {
                pod: "d".to_string(),
                container: "app".to_string(),
                slot: Slot::CpuLimit,
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("\"d\""), "got: {}", msg);
        assert!(msg.contains("\"app\""), "got: {}", msg);
        assert!(msg.contains("cpu limit"), "got: {}", msg);
    }

    #[test]
    fn test_report_namespace_wraps_errors() {
        let good = vec![PodResources::new(
            "web-1",
            vec![container("app", ("100m", "200m"), ("64Mi", "128Mi"))],
        )];
        let bad = vec![PodResources::new(
            "web-1",
            vec![container("app", ("100m", "200m"), ("64MB", "128Mi"))],
        )];

        match report_namespace("default", &good) {
            NamespaceReport::Totals(t) => assert_eq!(t.memory_requests.to_string(), "64Mi"),
            other => panic!("expected totals, got {:?}", other),
        }
        match report_namespace("broken-ns", &bad) {
            NamespaceReport::Failed { namespace, reason } => {
                assert_eq!(namespace, "broken-ns");
                assert!(reason.contains("memory request"), "got: {}", reason);
                assert!(reason.contains("64MB"), "got: {}", reason);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
