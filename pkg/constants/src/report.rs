//! Report layout constants.

/// Spaces added after the widest namespace name and the widest value.
pub const DEFAULT_PADDING: usize = 2;

/// Narrowest value column, before padding.
pub const DEFAULT_MIN_VALUE_WIDTH: usize = 1;

/// First line of every report.
pub const REPORT_TITLE: &str = "Namespace usage:";

/// Label printed in front of each namespace name.
pub const NAMESPACE_LABEL: &str = "Namespace: ";

/// Character repeated to draw separator lines.
pub const RULE_CHAR: char = '─';
