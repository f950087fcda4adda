//! Turn properties and components into RFC 5545 text.
//!
//! Everything written by this module ends in CRLF. Logical lines longer than the
//! configured limit (75 octets by default) are folded into several physical lines,
//! each continuation starting with a single space.

use std::borrow::Cow;

mod error;
pub use error::GeneratorError;

use crate::{CRLF, FOLD_LIMIT};

/// Options used while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Maximum length of a physical line in octets, CRLF excluded.
    /// `None` disables folding.
    pub folding: Option<usize>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            folding: Some(FOLD_LIMIT),
        }
    }
}

impl GeneratorOptions {
    #[must_use]
    pub fn with_folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }
}

pub trait Emitter {
    fn generate_with(&self, options: &GeneratorOptions) -> String;

    fn generate(&self) -> String {
        self.generate_with(&GeneratorOptions::default())
    }
}

/// Escape a TEXT value.
///
/// Backslash, comma, semicolon and newlines are escaped. CRLF and lone CR count as
/// one newline.
pub fn escape_text(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', ',', ';', '\n', '\r']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                let _ = chars.next_if_eq(&'\n');
                out.push_str("\\n");
            }
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Append `line` to `out` as one or more physical lines.
///
/// The first physical line holds at most `limit` octets, every continuation line a
/// leading space plus at most `limit - 1` octets. Splits only happen on char
/// boundaries; if not even one char fits, it is written anyway.
pub fn fold_line(line: &str, folding: Option<usize>, out: &mut String) {
    let Some(limit) = folding else {
        out.push_str(line);
        out.push_str(CRLF);
        return;
    };

    let mut rest = line;
    let mut budget = limit;
    loop {
        if rest.len() <= budget {
            out.push_str(rest);
            out.push_str(CRLF);
            return;
        }

        let mut split = budget;
        while split > 0 && !rest.is_char_boundary(split) {
            split -= 1;
        }
        if split == 0 {
            split = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }

        let (head, tail) = rest.split_at(split);
        out.push_str(head);
        out.push_str(CRLF);
        if tail.is_empty() {
            return;
        }
        out.push(' ');
        rest = tail;
        budget = limit.saturating_sub(1);
    }
}
