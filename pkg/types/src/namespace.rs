use pkg_quantity::{Cpu, Memory, Quantity};

/// Aggregated requests and limits of every container in one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTotals {
    pub name: String,
    pub cpu_requests: Quantity<Cpu>,
    pub cpu_limits: Quantity<Cpu>,
    pub memory_requests: Quantity<Memory>,
    pub memory_limits: Quantity<Memory>,
    /// Number of pods folded into the totals
    pub pods: usize,
    /// Number of containers folded into the totals
    pub containers: usize,
}

impl NamespaceTotals {
    /// All-zero totals for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cpu_requests: Quantity::zero(),
            cpu_limits: Quantity::zero(),
            memory_requests: Quantity::zero(),
            memory_limits: Quantity::zero(),
            pods: 0,
            containers: 0,
        }
    }
}

/// Outcome for one namespace: totals, or the reason they could not be computed.
///
/// A failed namespace is never rendered as zero totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceReport {
    Totals(NamespaceTotals),
    Failed { namespace: String, reason: String },
}

impl NamespaceReport {
    pub fn failed(namespace: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        NamespaceReport::Failed {
            namespace: namespace.into(),
            reason: reason.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            NamespaceReport::Totals(totals) => &totals.name,
            NamespaceReport::Failed { namespace, .. } => namespace,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, NamespaceReport::Failed { .. })
    }
}
