//! Output formatting utilities

use routegraph_core::Path;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// A found path, flattened to labels
#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub target: String,
    pub nodes: Vec<String>,
    pub hops: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<f64>,
}

impl PathReport {
    pub fn new(path: &Path<'_, String, f64>, weighted: bool) -> Self {
        let nodes: Vec<String> = path.labels().into_iter().cloned().collect();
        Self {
            target: nodes.last().cloned().unwrap_or_default(),
            hops: path.hops(),
            total_weight: weighted.then(|| path.total_weight()),
            nodes,
        }
    }
}

/// Format reports based on format type
pub fn format_reports(reports: &[PathReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Table => format_table(reports),
    }
}

fn format_table(reports: &[PathReport]) -> String {
    let width = reports
        .iter()
        .map(|report| report.target.len())
        .max()
        .unwrap_or(0)
        .max("NODE".len());

    let mut lines = vec![format!("{:<width$}  {:>4}  {:>8}  PATH", "NODE", "HOPS", "WEIGHT")];
    for report in reports {
        let weight = report
            .total_weight
            .map(|w| format!("{}", w))
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{:<width$}  {:>4}  {:>8}  {}",
            report.target,
            report.hops,
            weight,
            report.nodes.join(" -> ")
        ));
    }
    lines.join("\n")
}
