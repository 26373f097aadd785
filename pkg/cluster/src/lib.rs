//! Cluster access for the namespace report.
//!
//! [`ClusterSource`] is the seam between the report and the API server:
//! [`KubeSource`] talks to a real cluster, tests use an in-memory source.
//! [`collect`] drives a source and yields one report entry per namespace.

pub mod collect;
pub mod kube_source;
pub mod source;

pub use collect::collect;
pub use kube_source::KubeSource;
pub use source::ClusterSource;
