//! Structured-text rendering for assistant replies

use pulldown_cmark::{Options, Parser, html};

use crate::shared::errors::Result;

/// Render Markdown to HTML
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Render Markdown, reporting a renderer panic as `RenderFailure`
///
/// Native only: wasm32-unknown-unknown builds abort on panic, so the browser
/// renders without the guard and never takes the plain-text fallback.
#[cfg(not(target_arch = "wasm32"))]
pub fn render_structured(text: &str) -> Result<String> {
    guard_panics(text, render_markdown)
}

#[cfg(not(target_arch = "wasm32"))]
fn guard_panics(text: &str, renderer: impl FnOnce(&str) -> String) -> Result<String> {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use crate::shared::errors::ApiError;

    catch_unwind(AssertUnwindSafe(|| renderer(text)))
        .map_err(|_| ApiError::RenderFailure(format!("markdown renderer aborted on {} bytes", text.len())))
}

#[cfg(target_arch = "wasm32")]
pub fn render_structured(text: &str) -> Result<String> {
    Ok(render_markdown(text))
}

/// Rendered HTML, or the raw text escaped when rendering fails
pub fn render_or_plain(text: &str) -> String {
    render_with(text, render_structured)
}

fn render_with(text: &str, renderer: impl Fn(&str) -> Result<String>) -> String {
    match renderer(text) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Falling back to plain text: {}", e);
            plain_text_html(text)
        }
    }
}

/// Content shown verbatim (whitespace preserved by the `u-whitespace-pre-wrap` class)
pub fn plain_text_html(text: &str) -> String {
    format!("<div class=\"u-whitespace-pre-wrap\">{}</div>", escape_html(text))
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
