use crossterm::style::Stylize;
use pkg_constants::report::{
    DEFAULT_MIN_VALUE_WIDTH, DEFAULT_PADDING, NAMESPACE_LABEL, REPORT_TITLE, RULE_CHAR,
};
use pkg_types::namespace::{NamespaceReport, NamespaceTotals};

/// Row labels, in print order.
const ROW_LABELS: [&str; 4] = [
    "CPU Requests:",
    "CPU Limits:",
    "Memory Requests:",
    "Memory Limits:",
];

/// Formatting knobs for [`render`]. Everything that affects the output lives
/// here; the renderer reads no global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Spaces added after the widest name and the widest value
    pub padding: usize,
    /// Narrowest value column, before padding
    pub min_value_width: usize,
    /// Line printed before the first namespace
    pub title: Option<String>,
    /// Emit ANSI color (blue names, red errors)
    pub color: bool,
    /// Show pod/container counts next to each name
    pub summary: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            min_value_width: DEFAULT_MIN_VALUE_WIDTH,
            title: Some(REPORT_TITLE.to_string()),
            color: false,
            summary: false,
        }
    }
}

/// Column widths shared by every block of one report.
///
/// Computed from all entries before the first line is written, so every
/// block lines up with every other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    /// Longest namespace name
    pub max_name_len: usize,
    /// Name column: `max_name_len + padding`
    pub name_width: usize,
    /// Longest row label
    pub label_width: usize,
    /// Value column: longest formatted value (at least `min_value_width`) plus padding
    pub value_width: usize,
    /// Separator length: the widest header or row
    pub rule_width: usize,
}

impl ReportLayout {
    pub fn compute(entries: &[NamespaceReport], config: &RenderConfig) -> Self {
        let max_name_len = entries
            .iter()
            .map(|e| e.namespace().chars().count())
            .max()
            .unwrap_or(0);
        let name_width = max_name_len + config.padding;

        let longest_value = entries
            .iter()
            .filter_map(totals)
            .flat_map(rows)
            .map(|(_, value)| value.chars().count())
            .max()
            .unwrap_or(0);
        let value_width = longest_value.max(config.min_value_width) + config.padding;

        let label_width = ROW_LABELS.iter().map(|l| l.len()).max().unwrap_or(0);

        let summary_width = if config.summary {
            entries
                .iter()
                .filter_map(totals)
                .map(|t| summary(t).chars().count())
                .max()
                .unwrap_or(0)
        } else {
            0
        };

        let header_width = NAMESPACE_LABEL.chars().count() + name_width + summary_width;
        let row_width = label_width + 1 + value_width;

        Self {
            max_name_len,
            name_width,
            label_width,
            value_width,
            rule_width: header_width.max(row_width),
        }
    }
}

/// Render the whole report. Entries are printed in the order given.
///
/// Output depends only on the arguments: the same input always produces the
/// same bytes.
pub fn render(entries: &[NamespaceReport], config: &RenderConfig) -> String {
    let layout = ReportLayout::compute(entries, config);
    let rule: String = std::iter::repeat_n(RULE_CHAR, layout.rule_width).collect();

    let mut output = String::new();
    if let Some(title) = &config.title {
        output.push_str(title);
        output.push('\n');
    }

    for entry in entries {
        output.push_str(&header(entry, &layout, config));
        output.push('\n');
        output.push_str(&rule);
        output.push('\n');

        match entry {
            NamespaceReport::Failed { reason, .. } => {
                let line = format!("Error: {}", reason);
                if config.color {
                    output.push_str(&line.red().to_string());
                } else {
                    output.push_str(&line);
                }
                output.push('\n');
            }
            NamespaceReport::Totals(t) => {
                for (label, value) in rows(t) {
                    output.push_str(&format!(
                        "{:<label_width$} {:<value_width$}\n",
                        label,
                        value,
                        label_width = layout.label_width,
                        value_width = layout.value_width,
                    ));
                }
            }
        }

        output.push_str(&rule);
        output.push('\n');
        output.push('\n');
    }

    output
}

/// `Namespace: <name padded to the name column>[summary]`
fn header(entry: &NamespaceReport, layout: &ReportLayout, config: &RenderConfig) -> String {
    let name = entry.namespace();
    let fill = " ".repeat(layout.name_width.saturating_sub(name.chars().count()));
    let name = if config.color {
        name.blue().to_string()
    } else {
        name.to_string()
    };

    let mut line = format!("{}{}{}", NAMESPACE_LABEL, name, fill);
    if config.summary {
        if let NamespaceReport::Totals(t) = entry {
            line.push_str(&summary(t));
        }
    }
    line
}

fn totals(entry: &NamespaceReport) -> Option<&NamespaceTotals> {
    match entry {
        NamespaceReport::Totals(t) => Some(t),
        NamespaceReport::Failed { .. } => None,
    }
}

fn rows(t: &NamespaceTotals) -> [(&'static str, String); 4] {
    [
        (ROW_LABELS[0], t.cpu_requests.to_string()),
        (ROW_LABELS[1], t.cpu_limits.to_string()),
        (ROW_LABELS[2], t.memory_requests.to_string()),
        (ROW_LABELS[3], t.memory_limits.to_string()),
    ]
}

fn summary(t: &NamespaceTotals) -> String {
    format!(
        "{} {}, {} {}",
        t.pods,
        if t.pods == 1 { "pod" } else { "pods" },
        t.containers,
        if t.containers == 1 {
            "container"
        } else {
            "containers"
        }
    )
}
