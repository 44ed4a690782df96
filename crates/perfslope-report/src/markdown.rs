//! Markdown report renderer.

use std::fmt::{self, Write};

use crate::report::{REPORT_TITLE, status_label};
use crate::util::{is_valid_image_src, markdown_cell, split_counter_name, to_data_uri};
use crate::{ReportContext, ReportFormat, ReportRenderer};

/// Renders Markdown documents with pipe tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }

    fn render(&self, ctx: &ReportContext<'_>) -> String {
        let mut out = String::with_capacity(2048 + ctx.chart_image_base64.len());
        write_document(&mut out, ctx).expect("writing to a String cannot fail");
        out
    }
}

fn write_document(out: &mut String, ctx: &ReportContext<'_>) -> fmt::Result {
    writeln!(out, "# {REPORT_TITLE}\n")?;
    writeln!(
        out,
        "- **Generated:** {}",
        ctx.generated_at.format("%Y-%m-%d %H:%M")
    )?;
    writeln!(out, "- **Analysis window:** {}", ctx.window)?;
    writeln!(out, "- **Threshold:** {} {}\n", ctx.threshold, ctx.unit_label)?;

    writeln!(out, "## Summary\n")?;
    if !ctx.counters.is_empty() {
        writeln!(out, "- Counters imported: {}", ctx.counters.len())?;
    }
    writeln!(out, "- Counters analysed: {}", ctx.results.len())?;
    writeln!(out, "- Warnings: {}\n", ctx.warning_count())?;

    writeln!(out, "## Chart\n")?;
    write_chart(out, ctx.chart_image_base64)?;
    writeln!(out)?;

    writeln!(out, "## Counter Details\n")?;
    if ctx.results.is_empty() {
        writeln!(out, "No counter data.")?;
    } else {
        writeln!(
            out,
            "| Process | Counter | Slope ({}) | R² | Status |",
            ctx.unit_label
        )?;
        writeln!(out, "|---|---|---|---|---|")?;
        for result in ctx.results {
            let (process, counter) = split_counter_name(&result.counter_name);
            writeln!(
                out,
                "| {} | {} | {:.2} | {:.4} | {} |",
                markdown_cell(process),
                markdown_cell(counter),
                result.slope_per_10min,
                result.r_squared,
                status_label(result.is_warning),
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Counters Over Threshold\n")?;
    if ctx.warning_count() == 0 {
        return writeln!(out, "No counters exceeded the threshold.");
    }
    writeln!(out, "| Process | Counter | Slope ({}) |", ctx.unit_label)?;
    writeln!(out, "|---|---|---|")?;
    for result in ctx.warnings() {
        let (process, counter) = split_counter_name(&result.counter_name);
        writeln!(
            out,
            "| {} | {} | {:.2} |",
            markdown_cell(process),
            markdown_cell(counter),
            result.slope_per_10min,
        )?;
    }
    Ok(())
}

fn write_chart(out: &mut String, chart: &str) -> fmt::Result {
    if chart.is_empty() {
        return writeln!(out, "No chart image provided.");
    }
    let src = to_data_uri(chart);
    if is_valid_image_src(&src) {
        writeln!(out, "![Performance chart]({src})")
    } else {
        writeln!(out, "The chart image is not a valid base64 image.")
    }
}
