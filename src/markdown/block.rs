//! Line-level transforms.

use std::sync::LazyLock;

use regex::Regex;

use super::{escape_html, inline};

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([A-Za-z0-9 ]+)\]\(([A-Za-z0-9_\-.:/]+)\)").expect("valid image pattern")
});

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z0-9 ]+)\]\(([A-Za-z0-9_\-.:/]+)\)").expect("valid link pattern")
});

/// Heading markers, checked in this order.
const HEADINGS: [(&str, &str); 3] = [("### ", "h3"), ("## ", "h2"), ("# ", "h1")];

/// Quote marker as it appears after escaping.
const QUOTE: &str = "&gt; ";

const FENCE: &str = "```";

/// State carried from one line to the next.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockState {
    pub in_ordered_list: bool,
    pub in_unordered_list: bool,
    pub in_code_block: bool,
}

impl BlockState {
    /// Transform one raw line. Each rule sees the output of the previous one.
    pub fn transform_line(&mut self, raw: &str) -> String {
        let mut line = escape_html(raw);

        for (marker, tag) in HEADINGS {
            if let Some(rest) = line.strip_prefix(marker) {
                line = format!("<{tag}>{rest}</{tag}>");
            }
        }

        if let Some(rest) = line.strip_prefix(QUOTE) {
            line = format!("<blockquote>{rest}</blockquote>");
        }

        if line.trim() == FENCE {
            line = if self.in_code_block { "</pre>" } else { "<pre>" }.to_string();
            self.in_code_block = !self.in_code_block;
        }

        line = line.replace("---", "<hr>");

        // Images first, so the link pattern cannot claim their tail.
        line = IMAGE
            .replace_all(&line, r#"<img src="${2}" alt="${1}" title="${1}">"#)
            .into_owned();
        line = LINK
            .replace_all(&line, r#"<a href="${2}">${1}</a>"#)
            .into_owned();

        line = self.ordered_item(line);
        line = self.unordered_item(line);

        inline::transform(&line)
    }

    fn ordered_item(&mut self, line: String) -> String {
        match ordered_marker(&line) {
            Some(item) => {
                let open = if self.in_ordered_list { "<li>" } else { "<ol><li>" };
                self.in_ordered_list = true;
                format!("{open}{item}</li>")
            }
            None if self.in_ordered_list => {
                self.in_ordered_list = false;
                format!("</ol>\n{line}")
            }
            None => line,
        }
    }

    fn unordered_item(&mut self, line: String) -> String {
        match line.strip_prefix("- ") {
            Some(item) => {
                let open = if self.in_unordered_list { "<li>" } else { "<ul><li>" };
                self.in_unordered_list = true;
                format!("{open}{item}</li>")
            }
            None if self.in_unordered_list => {
                self.in_unordered_list = false;
                format!("</ul>\n{line}")
            }
            None => line,
        }
    }
}

/// Item text of a `N. ` line, where N is a single digit 1-9.
fn ordered_marker(line: &str) -> Option<&str> {
    match line.as_bytes().first() {
        Some(b'1'..=b'9') => line[1..].strip_prefix(". "),
        _ => None,
    }
}
