//! Word-level transforms.

const CODE_OPEN: &str = "<code class=\"inline\">";
const STRIKE_OPEN: &str = "<del>&nbsp;";
const STRIKE_CLOSE: &str = "&nbsp;</del>";

/// Toggles for spans that may cover several words of one line.
#[derive(Debug, Default)]
struct InlineState {
    bold: bool,
    italic: bool,
    code: bool,
    strike: bool,
}

/// Apply span markers to every space-separated word of `line`.
pub(super) fn transform(line: &str) -> String {
    let mut state = InlineState::default();
    line.split(' ')
        .map(|word| state.word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

impl InlineState {
    fn word(&mut self, word: &str) -> String {
        let mut word = word.to_string();

        if !self.bold {
            if let Some(rest) = word.strip_prefix("**") {
                word = format!("<b>{rest}");
                self.bold = true;
            }
        }
        if self.bold {
            if let Some(rest) = word.strip_suffix("**") {
                word = format!("{rest}</b>");
                self.bold = false;
            }
        }

        // Sees whatever asterisks the bold checks left behind.
        if !self.italic {
            if let Some(rest) = word.strip_prefix('*') {
                word = format!("<i>{rest}");
                self.italic = true;
            }
        }
        if self.italic {
            if let Some(rest) = word.strip_suffix('*') {
                word = format!("{rest}</i>");
                self.italic = false;
            }
        }

        if !self.code {
            if let Some(rest) = word.strip_prefix('`') {
                word = format!("{CODE_OPEN}{rest}");
                self.code = true;
            }
        }
        if self.code {
            if let Some(rest) = word.strip_suffix('`') {
                word = format!("{rest}</code>");
                self.code = false;
            } else if let Some(rest) = before_last_char(&word).and_then(|w| w.strip_suffix('`')) {
                word = format!("{rest}</code>.");
                self.code = false;
            }
        }

        if !self.strike {
            if let Some(rest) = word.strip_prefix("~~") {
                word = format!("{STRIKE_OPEN}{rest}");
                self.strike = true;
            }
        }
        if self.strike {
            if let Some(rest) = word.strip_suffix("~~") {
                word = format!("{rest}{STRIKE_CLOSE}");
                self.strike = false;
            } else if let Some(rest) = before_last_char(&word).and_then(|w| w.strip_suffix("~~")) {
                word = format!("{rest}{STRIKE_CLOSE}.");
                self.strike = false;
            }
        }

        word
    }
}

/// `word` without its final character.
fn before_last_char(word: &str) -> Option<&str> {
    word.char_indices().last().map(|(idx, _)| &word[..idx])
}
