//! HTML report renderer.

use std::fmt::{self, Write};

use crate::report::{REPORT_TITLE, status_label};
use crate::util::{html_escape, is_valid_image_src, split_counter_name, to_data_uri};
use crate::{ReportContext, ReportFormat, ReportRenderer};

/// Inline stylesheet of the HTML report.
const STYLES: &str = "\
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; max-width: 1200px; margin: 0 auto; padding: 20px; background-color: #f5f5f5; color: #333; }
h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }
h2 { color: #2980b9; margin-top: 30px; }
.meta-info { background-color: #ecf0f1; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
.summary { background-color: #fff; padding: 15px; border-radius: 5px; border: 1px solid #ddd; }
.chart img { max-width: 100%; border: 1px solid #ddd; border-radius: 5px; }
table { width: 100%; border-collapse: collapse; margin-top: 10px; background-color: #fff; }
th, td { border: 1px solid #ddd; padding: 10px; text-align: left; }
th { background-color: #3498db; color: #fff; }
tr:nth-child(even) { background-color: #f9f9f9; }
tr.warning { background-color: #ffe0e0; color: #c0392b; font-weight: bold; }";

/// Renders standalone HTML pages. All counter text is escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl ReportRenderer for HtmlRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }

    fn render(&self, ctx: &ReportContext<'_>) -> String {
        let mut out = String::with_capacity(4096 + ctx.chart_image_base64.len());
        write_document(&mut out, ctx).expect("writing to a String cannot fail");
        out
    }
}

fn write_document(out: &mut String, ctx: &ReportContext<'_>) -> fmt::Result {
    let unit = html_escape(ctx.unit_label);

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"UTF-8\">")?;
    writeln!(
        out,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(out, "<title>{REPORT_TITLE}</title>")?;
    writeln!(out, "<style>\n{STYLES}\n</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{REPORT_TITLE}</h1>")?;

    writeln!(out, "<div class=\"meta-info\">")?;
    writeln!(
        out,
        "<p><strong>Generated:</strong> {}</p>",
        ctx.generated_at.format("%Y-%m-%d %H:%M")
    )?;
    writeln!(out, "<p><strong>Analysis window:</strong> {}</p>", ctx.window)?;
    writeln!(
        out,
        "<p><strong>Threshold:</strong> {} {unit}</p>",
        ctx.threshold
    )?;
    writeln!(out, "</div>")?;

    writeln!(out, "<h2>Summary</h2>")?;
    writeln!(out, "<div class=\"summary\">")?;
    if !ctx.counters.is_empty() {
        writeln!(out, "<p>Counters imported: {}</p>", ctx.counters.len())?;
    }
    writeln!(out, "<p>Counters analysed: {}</p>", ctx.results.len())?;
    writeln!(out, "<p>Warnings: {}</p>", ctx.warning_count())?;
    writeln!(out, "</div>")?;

    writeln!(out, "<h2>Chart</h2>")?;
    write_chart(out, ctx.chart_image_base64)?;

    writeln!(out, "<h2>Counter Details</h2>")?;
    write_detail_table(out, ctx, &unit)?;

    writeln!(out, "<h2>Counters Over Threshold</h2>")?;
    write_warning_table(out, ctx, &unit)?;

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_chart(out: &mut String, chart: &str) -> fmt::Result {
    if chart.is_empty() {
        return writeln!(out, "<p>No chart image provided.</p>");
    }
    let src = to_data_uri(chart);
    if is_valid_image_src(&src) {
        writeln!(
            out,
            "<div class=\"chart\"><img src=\"{src}\" alt=\"Performance chart\" /></div>"
        )
    } else {
        writeln!(out, "<p>The chart image is not a valid base64 image.</p>")
    }
}

fn write_detail_table(out: &mut String, ctx: &ReportContext<'_>, unit: &str) -> fmt::Result {
    if ctx.results.is_empty() {
        return writeln!(out, "<p>No counter data.</p>");
    }

    writeln!(out, "<table>")?;
    writeln!(
        out,
        "<thead>\n<tr><th>Process</th><th>Counter</th><th>Slope ({unit})</th><th>R²</th><th>Status</th></tr>\n</thead>"
    )?;
    writeln!(out, "<tbody>")?;
    for result in ctx.results {
        let (process, counter) = split_counter_name(&result.counter_name);
        let row_class = if result.is_warning { " class=\"warning\"" } else { "" };
        writeln!(
            out,
            "<tr{row_class}><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.4}</td><td>{}</td></tr>",
            html_escape(process),
            html_escape(counter),
            result.slope_per_10min,
            result.r_squared,
            status_label(result.is_warning),
        )?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")
}

fn write_warning_table(out: &mut String, ctx: &ReportContext<'_>, unit: &str) -> fmt::Result {
    if ctx.warning_count() == 0 {
        return writeln!(out, "<p>No counters exceeded the threshold.</p>");
    }

    writeln!(out, "<table class=\"warning-table\">")?;
    writeln!(
        out,
        "<thead>\n<tr><th>Process</th><th>Counter</th><th>Slope ({unit})</th></tr>\n</thead>"
    )?;
    writeln!(out, "<tbody>")?;
    for result in ctx.warnings() {
        let (process, counter) = split_counter_name(&result.counter_name);
        writeln!(
            out,
            "<tr class=\"warning\"><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
            html_escape(process),
            html_escape(counter),
            result.slope_per_10min,
        )?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")
}
