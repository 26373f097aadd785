//! Centralized constants for kube-nsusage.
//!
//! All project-wide default values live here.
//! Change a value in one place and it applies everywhere.

pub mod cluster;
pub mod paths;
pub mod report;
