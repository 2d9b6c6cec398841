//! Markdown rendering utilities.
//!
//! Provides safe markdown-to-HTML conversion with XSS protection.

use comrak::{Options, markdown_to_html as render};

/// Convert markdown content to sanitized HTML.
///
/// Supports strikethrough, tables and autolinks. The output is sanitized
/// using `ammonia`, so post bodies written by other users cannot inject
/// scripts or event handlers.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;

    ammonia::clean(&render(markdown, &options))
}
