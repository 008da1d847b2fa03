use std::fmt;

use crate::common::span::Span;

/// A diagnostic raised while lexing or parsing: a reason plus zero or more
/// spanned notes pointing at the offending source. The parser's public
/// `errors()` contract (a flat `Vec<String>`) is a projection of these, via
/// `Syntax::message()`; richer consumers (the REPL) can print the full
/// `Display` impl instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    pub reason: String,
    pub notes: Vec<(Span, Option<String>)>,
}

impl Syntax {
    pub fn error(reason: &str, span: &Span) -> Syntax {
        Syntax { reason: reason.to_string(), notes: vec![(span.clone(), None)] }
    }

    pub fn error_with_note(reason: &str, span: &Span, note: &str) -> Syntax {
        Syntax { reason: reason.to_string(), notes: vec![(span.clone(), Some(note.to_string()))] }
    }

    /// The plain, unspanned message, matching the exact wording the spec's
    /// error-message contract tests against.
    pub fn message(&self) -> String {
        self.reason.clone()
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (span, note) in &self.notes {
            if !span.is_empty() {
                fmt::Display::fmt(span, f)?;
            }
            if let Some(note) = note {
                writeln!(f, "note: {}", note)?;
            }
        }
        write!(f, "Syntax Error: {}", self.reason)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::source::Source;

    #[test]
    fn error_message_is_bare() {
        let source = Source::source("let x = ;");
        let err = Syntax::error("expected next token to be INT, got SEMICOLON", &Span::new(&source, 8, 1));
        assert_eq!(err.message(), "expected next token to be INT, got SEMICOLON");
    }
}
