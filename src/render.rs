//! Pull request body rendering

/// Separates the description template from the accumulated reports
pub const REPORT_MARKER: &str = "<!-- prsync:report -->";

/// Body rendering capability consumed by the engine
pub trait BodyRenderer: Send + Sync {
    /// Build the full pull request body from the description template and
    /// the report text
    fn generate(&self, template: &str, report: &str) -> String;

    /// Merge a new report into the body of an existing pull request,
    /// returning the report text to pass to [`generate`](Self::generate)
    fn merge(&self, existing_body: &str, new_report: &str) -> String;
}

/// Markdown renderer that keeps one copy of each distinct report
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl BodyRenderer for MarkdownRenderer {
    fn generate(&self, template: &str, report: &str) -> String {
        let template = template.trim();
        let report = report.trim();
        if template.is_empty() {
            format!("{REPORT_MARKER}\n\n{report}")
        } else {
            format!("{template}\n\n{REPORT_MARKER}\n\n{report}")
        }
    }

    fn merge(&self, existing_body: &str, new_report: &str) -> String {
        // Bodies written before the marker existed are kept whole
        let previous = existing_body
            .split_once(REPORT_MARKER)
            .map_or(existing_body, |(_, reports)| reports)
            .trim();
        let new_report = new_report.trim();

        if previous.is_empty() {
            return new_report.to_string();
        }
        if new_report.is_empty() || contains_section(previous, new_report) {
            return previous.to_string();
        }
        format!("{previous}\n\n{new_report}")
    }
}

/// Whether `report` already appears in `reports` as whole `\n\n` blocks
fn contains_section(reports: &str, report: &str) -> bool {
    reports == report
        || reports.starts_with(&format!("{report}\n\n"))
        || reports.ends_with(&format!("\n\n{report}"))
        || reports.contains(&format!("\n\n{report}\n\n"))
}
