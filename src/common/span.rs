use std::fmt::{Display, Formatter, Result};
use std::rc::Rc;
use std::usize;

use crate::common::source::Source;

/// A `Span` refers to a section of a `Source`, much like a `&str`, but
/// carrying a reference to where it came from rather than the text itself.
/// Tokens and AST nodes are tagged with a `Span` so that lexer, parser, and
/// evaluator diagnostics can all point back at the offending source text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Span {
    source: Option<Rc<Source>>,
    offset: usize,
    length: usize,
}

impl Span {
    /// Create a new `Span` from a byte offset and length.
    pub fn new(source: &Rc<Source>, offset: usize, length: usize) -> Span {
        Span { source: Some(Rc::clone(source)), offset, length }
    }

    /// A `Span` that points at a single byte.
    pub fn point(source: &Rc<Source>, offset: usize) -> Span {
        Span { source: Some(Rc::clone(source)), offset, length: 1 }
    }

    /// An empty `Span`, with no source. Combining an empty span with any
    /// other span yields the other span unchanged.
    pub fn empty() -> Span {
        Span { source: None, offset: 0, length: usize::MAX }
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none()
    }

    /// The smallest `Span` that covers both `a` and `b`.
    /// ```plain
    /// hello this is cool
    /// ^^^^^              | Span a
    ///            ^^      | Span b
    /// ^^^^^^^^^^^^^      | combined
    /// ```
    pub fn combine(a: &Span, b: &Span) -> Span {
        if a.is_empty() { return b.clone(); }
        if b.is_empty() { return a.clone(); }

        if a.source != b.source {
            panic!("can't combine two spans with different sources")
        }

        let offset = a.offset.min(b.offset);
        let end = (a.offset + a.length).max(b.offset + b.length);
        let length = end - offset;

        Span::new(a.source.as_ref().unwrap(), offset, length)
    }

    /// Fold `Span::combine` over a set of spans, e.g. every span of every
    /// statement in a block.
    pub fn join(mut spans: Vec<Span>) -> Span {
        let mut combined = match spans.pop() {
            Some(span) => span,
            None => return Span::empty(),
        };

        while let Some(span) = spans.pop() {
            combined = Span::combine(&combined, &span);
        }

        combined
    }

    /// The source text this `Span` covers. Panics if the span is empty or
    /// straddles an invalid byte boundary.
    pub fn contents(&self) -> String {
        if self.is_empty() {
            panic!("an empty span has no contents")
        }
        let source = self.source.as_ref().unwrap();
        source.contents[self.offset..self.offset + self.length].to_string()
    }

    fn line_indicies(&self) -> Option<((usize, usize), (usize, usize))> {
        if self.is_empty() {
            panic!("can't find the line indicies of an empty span")
        }

        let start = self.offset;
        let end = self.offset + self.length;
        let contents = &self.source.as_ref().unwrap().contents;

        let start_lines: Vec<&str> = contents[..=start.min(contents.len().saturating_sub(1))].lines().collect();
        let end_lines: Vec<&str> = contents[..=end.min(contents.len()).saturating_sub(1).max(0)].lines().collect();

        let start_line = start_lines.len().saturating_sub(1);
        let end_line = end_lines.len().saturating_sub(1);

        let start_col = start_lines.last()?.len().saturating_sub(1);
        let end_col = end_lines.last()?.len().saturating_sub(1);

        Some(((start_line, start_col), (end_line, end_col)))
    }
}

impl Display for Span {
    /// Prints where a `Span` occurs in its source, e.g.
    /// ```plain
    /// Line 1:5
    ///   |
    /// 1 | let x = ;
    ///   |         ^
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.is_empty() {
            panic!("can't display an empty span")
        }

        let lines: Vec<&str> = self.source.as_ref().unwrap().contents.lines().collect();
        let ((start_line, start_col), (end_line, _end_col)) = match self.line_indicies() {
            Some(li) => li,
            None => return write!(f, "<empty source>"),
        };

        let readable_start_line = (start_line + 1).to_string();
        let readable_end_line = (end_line + 1).to_string();
        let padding = readable_end_line.len();

        let location = format!("Line {}:{}", readable_start_line, start_col + 1);
        let separator = format!("{} |", " ".repeat(padding));

        if start_line == end_line {
            let l = lines.get(end_line).copied().unwrap_or("");
            let line = format!("{} | {}", readable_end_line, l);
            let span = format!(
                "{} | {}{}",
                " ".repeat(padding),
                " ".repeat(start_col),
                "^".repeat(self.length.max(1)),
            );

            writeln!(f, "{}", location)?;
            writeln!(f, "{}", separator)?;
            writeln!(f, "{}", line)?;
            writeln!(f, "{}", span)
        } else {
            let formatted = lines[start_line..=end_line.min(lines.len().saturating_sub(1))]
                .iter()
                .enumerate()
                .map(|(i, l)| {
                    let readable_line_no = (start_line + i + 1).to_string();
                    let partial_padding = " ".repeat(padding.saturating_sub(readable_line_no.len()));
                    format!("{}{} > {}", partial_padding, readable_line_no, l)
                })
                .collect::<Vec<String>>()
                .join("\n");

            writeln!(f, "{}", location)?;
            writeln!(f, "{}", separator)?;
            writeln!(f, "{}", formatted)?;
            writeln!(f, "{}", separator)
        }
    }
}

/// Pairs a value with the `Span` of source text it was parsed from, e.g.
/// `Spanned<Token>` or `Spanned<Expression>`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Spanned<T> {
    pub item: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(item: T, span: Span) -> Spanned<T> {
        Spanned { item, span }
    }

    /// Discards the span, keeping just the wrapped value.
    pub fn into_item(self) -> T { self.item }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn combination() {
        let source = Source::source("heck, that's awesome");
        let a = Span::new(&source, 0, 5);
        let b = Span::new(&source, 11, 2);

        assert_eq!(Span::combine(&a, &b), Span::new(&source, 0, 13));
    }

    #[test]
    fn span_and_contents() {
        let source = Source::source("hello, this is some text!");
        let spans = vec![
            Span::new(&source, 0, 8),
            Span::new(&source, 7, 5),
            Span::new(&source, 12, 4),
        ];
        let result = Span::new(&source, 0, 16);

        assert_eq!(Span::join(spans).contents(), result.contents());
    }
}
