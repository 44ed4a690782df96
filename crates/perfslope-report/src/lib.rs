//! HTML and Markdown trend reports for perfslope.
//!
//! - [`ReportFormat`] - Available report formats
//! - [`ReportContext`] - Everything a report shows
//! - [`ReportRenderer`] - Trait implemented by each format
//! - [`generate_report`] - Renders a report and names the output file

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perfslope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod format;
mod html;
mod markdown;
mod report;
mod util;

pub use context::{DEFAULT_UNIT_LABEL, ReportContext};
pub use format::{FormatError, ReportFormat};
pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use report::{Report, ReportRenderer, generate_report, renderer_for};
pub use util::{html_escape, is_valid_image_src, split_counter_name, to_data_uri};
