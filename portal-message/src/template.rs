//! Template compiler: turns a raw message string into [`Segment`]s.
//!
//! Escaping is scoped to braces: a run of `n` backslashes directly before a
//! `{` or `}` contributes `n / 2` literal backslashes, and the brace is
//! escaped iff `n` is odd. Backslashes anywhere else are ordinary characters
//! and pass through untouched.
//!
//! Compilation never fails. Unmatched delimiters fall back to literal text.

use serde::{Deserialize, Serialize};

/// Opens a token.
pub const TOKEN_PREFIX: char = '{';

/// Closes a token.
pub const TOKEN_SUFFIX: char = '}';

/// Escapes a following brace.
pub const ESCAPE: char = '\\';

/// One compiled piece of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Segment {
    /// Text emitted as-is.
    Literal(String),
    /// Placeholder consuming the next positional argument. The directive is
    /// the text between the braces, `None` for `{}`.
    Token(Option<String>),
}

/// A template compiled once and rendered many times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledTemplate {
    segments: Vec<Segment>,
    token_count: usize,
}

impl CompiledTemplate {
    /// Compile `raw`. See the module docs for the escaping rules.
    pub fn compile(raw: &str) -> Self {
        Compiler::default().run(raw)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of arguments a render needs at minimum.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Directives of every token, in order (`None` for plain tokens).
    pub fn directives(&self) -> impl Iterator<Item = Option<&str>> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Token(d) => Some(d.as_deref()),
            Segment::Literal(_) => None,
        })
    }
}

impl From<&str> for CompiledTemplate {
    fn from(raw: &str) -> Self {
        Self::compile(raw)
    }
}

/// Free-function form of [`CompiledTemplate::compile`].
pub fn compile(raw: &str) -> CompiledTemplate {
    CompiledTemplate::compile(raw)
}

// ---------------------------------------------------------------------------
// Compiler
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Compiler {
    segments: Vec<Segment>,
    literal: String,
    /// Content gathered since an unclosed real `{`.
    open: Option<String>,
    /// Backslashes seen but not yet resolved.
    run: usize,
}

impl Compiler {
    fn run(mut self, raw: &str) -> CompiledTemplate {
        for c in raw.chars() {
            match c {
                ESCAPE => self.run += 1,
                TOKEN_PREFIX | TOKEN_SUFFIX => self.brace(c),
                _ => {
                    let run = std::mem::take(&mut self.run);
                    let buf = self.buffer();
                    push_escapes(buf, run);
                    buf.push(c);
                }
            }
        }

        let run = std::mem::take(&mut self.run);
        push_escapes(self.buffer(), run);
        if let Some(open) = self.open.take() {
            self.literal.push(TOKEN_PREFIX);
            self.literal.push_str(&open);
        }
        self.flush_literal();

        let token_count = self
            .segments
            .iter()
            .filter(|s| matches!(s, Segment::Token(_)))
            .count();
        CompiledTemplate { segments: self.segments, token_count }
    }

    fn brace(&mut self, brace: char) {
        let run = std::mem::take(&mut self.run);
        let buf = self.buffer();
        push_escapes(buf, run / 2);
        if run % 2 == 1 {
            buf.push(brace);
            return;
        }

        if brace == TOKEN_PREFIX {
            // A second opener abandons the first one as plain text.
            if let Some(abandoned) = self.open.take() {
                self.literal.push(TOKEN_PREFIX);
                self.literal.push_str(&abandoned);
            }
            self.open = Some(String::new());
            return;
        }

        match self.open.take() {
            Some(directive) => {
                self.flush_literal();
                let directive = (!directive.is_empty()).then_some(directive);
                self.segments.push(Segment::Token(directive));
            }
            None => self.literal.push(TOKEN_SUFFIX),
        }
    }

    /// Where resolved characters currently go.
    fn buffer(&mut self) -> &mut String {
        match self.open.as_mut() {
            Some(directive) => directive,
            None => &mut self.literal,
        }
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            self.segments.push(Segment::Literal(std::mem::take(&mut self.literal)));
        }
    }
}

fn push_escapes(buf: &mut String, count: usize) {
    buf.extend(std::iter::repeat(ESCAPE).take(count));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    fn tok(d: Option<&str>) -> Segment {
        Segment::Token(d.map(str::to_string))
    }

    #[test]
    fn plain_text_is_single_literal() {
        let t = compile("hello world");
        assert_eq!(t.segments(), [lit("hello world")]);
        assert_eq!(t.token_count(), 0);
    }

    #[test]
    fn empty_input_has_no_segments() {
        let t = compile("");
        assert!(t.segments().is_empty());
        assert_eq!(t.token_count(), 0);
    }

    #[test]
    fn tokens_split_literals() {
        let t = compile("a {} b {&e} c");
        assert_eq!(
            t.segments(),
            [lit("a "), tok(None), lit(" b "), tok(Some("&e")), lit(" c")]
        );
        assert_eq!(t.token_count(), 2);
        assert_eq!(t.directives().collect::<Vec<_>>(), [None, Some("&e")]);
    }

    #[test]
    fn adjacent_tokens_emit_no_empty_literal() {
        let t = compile("{}{}");
        assert_eq!(t.segments(), [tok(None), tok(None)]);
    }

    #[test]
    fn backslashes_away_from_braces_pass_through() {
        let t = compile(r"&ctes\\t \ end\");
        assert_eq!(t.segments(), [lit(r"&ctes\\t \ end\")]);
    }

    #[test]
    fn odd_run_escapes_brace() {
        let t = compile(r"\{\}");
        assert_eq!(t.segments(), [lit("{}")]);
        assert_eq!(t.token_count(), 0);
    }

    #[test]
    fn even_run_collapses_and_keeps_delimiter() {
        let t = compile(r"\\{}");
        assert_eq!(t.segments(), [lit(r"\"), tok(None)]);
    }

    #[test]
    fn three_backslashes_collapse_to_one_and_escape() {
        let t = compile(r"\\\{x}");
        assert_eq!(t.segments(), [lit(r"\{x}")]);
    }

    #[test]
    fn unmatched_opener_becomes_literal() {
        let t = compile("open { never closed");
        assert_eq!(t.segments(), [lit("open { never closed")]);
        assert_eq!(t.token_count(), 0);
    }

    #[test]
    fn unmatched_closer_becomes_literal() {
        let t = compile("stray } here {}");
        assert_eq!(t.segments(), [lit("stray } here "), tok(None)]);
    }

    #[test]
    fn second_opener_abandons_first() {
        let t = compile("{a{b}");
        assert_eq!(t.segments(), [lit("{a"), tok(Some("b"))]);
    }

    #[test]
    fn escaped_brace_inside_directive_is_kept() {
        let t = compile(r"{a\}b}");
        assert_eq!(t.segments(), [tok(Some("a}b"))]);
    }

    #[test]
    fn trailing_backslashes_inside_unclosed_token_survive() {
        let t = compile(r"x{ab\\");
        assert_eq!(t.segments(), [lit(r"x{ab\\")]);
    }
}
