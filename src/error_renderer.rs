//! Error rendering using ariadne
//!
//! Turns parse and evaluation errors into reports with the offending source
//! snippet underlined and the stable error code in the header.

use crate::Error;
use ariadne::{ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<input>";

/// Render an error for `source` to stderr
///
/// # Example
/// ```no_run
/// use exacta::{Environment, evaluate, render_error};
///
/// let source = "1 + missing";
/// if let Err(e) = evaluate(source, &Environment::new()) {
///     render_error(&e, source);
/// }
/// ```
pub fn render_error(error: &Error, source: &str) {
    render_error_to_writer(error, source, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, source: &str, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, source, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Same as `render_error_to_string` but without ANSI color codes.
pub fn render_error_to_string_no_color(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let message = error.message();
    // Errors without a location (step limit, for one) point at the start.
    let span = error
        .location()
        .map(|location| location.span.0.clone())
        .unwrap_or(0..0);

    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_code(error.code())
        .with_message(&message)
        .with_config(
            Config::default()
                .with_color(use_color)
                .with_index_type(IndexType::Byte),
        );

    if error.location().is_some() {
        report = report.with_label(
            Label::new((SOURCE_ID, span))
                .with_message(&message)
                .with_color(colors.next()),
        );
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}
