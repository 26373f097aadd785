//! Namespace resource report: fold pods into totals, then render them.
//!
//! [`render`] sizes its columns from every namespace's totals, so all
//! namespaces are accumulated before the first line is produced.

pub mod accumulate;
pub mod render;

pub use accumulate::{AccumulateError, Slot, accumulate, report_namespace};
pub use render::{RenderConfig, ReportLayout, render};
