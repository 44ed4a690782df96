//! Report generation entry point.

use crate::{HtmlRenderer, MarkdownRenderer, ReportContext, ReportFormat};

/// Title shown at the top of every report.
pub(crate) const REPORT_TITLE: &str = "Perfmon Trend Report";

/// Renders a [`ReportContext`] in one format.
pub trait ReportRenderer: Send + Sync {
    /// Returns the format this renderer produces.
    fn format(&self) -> ReportFormat;

    /// Renders the report document.
    fn render(&self, ctx: &ReportContext<'_>) -> String;
}

/// Returns the renderer for a format.
#[must_use]
pub fn renderer_for(format: ReportFormat) -> &'static dyn ReportRenderer {
    match format {
        ReportFormat::Html => &HtmlRenderer,
        ReportFormat::Markdown => &MarkdownRenderer,
    }
}

/// A rendered report ready to be saved or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Rendered document.
    pub content: String,
    /// Suggested file name, `perfmon_report_{YYYYMMDD_HHMMSS}.{ext}`.
    pub file_name: String,
    /// MIME type of the document.
    pub content_type: String,
}

/// Renders a report in the format named by `format_tag`.
///
/// Unknown or absent tags produce HTML. The file name is stamped with the
/// context's generation time.
#[must_use]
pub fn generate_report(format_tag: Option<&str>, ctx: &ReportContext<'_>) -> Report {
    let format = ReportFormat::from_tag(format_tag);
    let content = renderer_for(format).render(ctx);
    let file_name = format!(
        "perfmon_report_{}.{}",
        ctx.generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    );

    tracing::debug!(
        %format,
        results = ctx.results.len(),
        bytes = content.len(),
        file_name = %file_name,
        "rendered report"
    );

    Report {
        content,
        file_name,
        content_type: format.content_type().to_string(),
    }
}

/// Status label for a result row.
pub(crate) const fn status_label(is_warning: bool) -> &'static str {
    if is_warning { "⚠ Warning" } else { "✓ OK" }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};
    use perfslope_types::{SlopeResult, TimeWindow};

    pub(crate) fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 8)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    pub(crate) fn window() -> TimeWindow {
        TimeWindow::new(at(0, 0, 0), at(1, 0, 0)).unwrap()
    }

    pub(crate) fn results() -> Vec<SlopeResult> {
        vec![
            SlopeResult {
                counter_name: "\\\\SERVER\\Process(w3wp)\\Private Bytes".to_string(),
                slope_per_10min: 120.456,
                r_squared: 0.98761,
                is_warning: true,
            },
            SlopeResult {
                counter_name: "\\\\SERVER\\Memory\\Available MBytes".to_string(),
                slope_per_10min: -1.5,
                r_squared: 0.5,
                is_warning: false,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_generate_html_report() {
        let results = results();
        let ctx = ReportContext::new(&results, window(), 50.0).with_generated_at(at(9, 5, 7));
        let report = generate_report(Some("html"), &ctx);
        assert_eq!(report.file_name, "perfmon_report_20260208_090507.html");
        assert_eq!(report.content_type, "text/html");
        assert!(report.content.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_generate_markdown_report() {
        let results = results();
        let ctx = ReportContext::new(&results, window(), 50.0).with_generated_at(at(9, 5, 7));
        let report = generate_report(Some("md"), &ctx);
        assert_eq!(report.file_name, "perfmon_report_20260208_090507.md");
        assert_eq!(report.content_type, "text/markdown");
        assert!(report.content.starts_with("# Perfmon Trend Report"));
    }

    #[test]
    fn test_unknown_format_falls_back_to_html() {
        let results = results();
        let ctx = ReportContext::new(&results, window(), 50.0).with_generated_at(at(9, 5, 7));
        for tag in [None, Some("pdf"), Some("")] {
            let report = generate_report(tag, &ctx);
            assert_eq!(report.content_type, "text/html");
            assert!(report.file_name.ends_with(".html"));
        }
    }

    #[test]
    fn test_renderer_for() {
        for format in ReportFormat::all() {
            assert_eq!(renderer_for(*format).format(), *format);
        }
    }
}
