//! Cluster access constants.

/// Number of namespaces whose pods are listed in parallel.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Page size for list calls against the API server.
/// Continue tokens are followed until the list is exhausted.
pub const LIST_PAGE_SIZE: u32 = 500;

/// Resource map key for CPU in container requests/limits.
pub const RESOURCE_CPU: &str = "cpu";

/// Resource map key for memory in container requests/limits.
pub const RESOURCE_MEMORY: &str = "memory";
