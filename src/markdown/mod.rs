//! Markdown to HTML conversion.
//!
//! # Data Flow
//! ```text
//! input text
//!     → split on '\n'
//!     → block.rs (escape, headings, quotes, fences, rules, images, links, lists)
//!     → inline.rs (word-by-word emphasis, code spans, strikethrough)
//!     → join with '\n'
//!     → "\n\n" collapsed to "<br><br>"
//! ```
//!
//! # Design Decisions
//! - Positional string checks only; there is no tokenizer or tree
//! - List and code-fence state carries across lines, inline state resets per line
//! - Output is a pure function of the input; nothing survives between calls
//!
//! The dialect is deliberately loose and some inputs render oddly. A `**`
//! word while bold is already open, for instance, also satisfies the italic
//! `*` prefix check and opens an italic span. Themes rely on the exact output,
//! so these quirks are part of the behaviour.

mod block;
mod inline;

use crate::observability::metrics;

pub use block::BlockState;

/// Render `input` to HTML.
pub fn render(input: &str) -> String {
    let mut state = BlockState::default();
    let mut html = String::with_capacity(input.len() * 2);

    for raw in input.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        html.push_str(&state.transform_line(raw));
        html.push('\n');
    }

    metrics::record_markdown_render();
    html.replace("\n\n", "<br><br>")
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
