//! Renderer: substitutes arguments into a [`CompiledTemplate`].

use crate::error::MessageError;
use crate::format::{self, FormattingState, RESET};
use crate::template::{CompiledTemplate, Segment};

impl CompiledTemplate {
    /// Render with positional `args`, one per token in order.
    ///
    /// Fails only when `args` is shorter than [`token_count`](Self::token_count).
    /// Extra arguments are ignored.
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> Result<String, MessageError> {
        render(self, args)
    }
}

/// Render `template` with positional `args`.
///
/// A token carrying a directive is wrapped as
/// `RESET directive value RESET restore`, where `restore` re-applies the
/// color and formats that were active before the token.
pub fn render<S: AsRef<str>>(
    template: &CompiledTemplate,
    args: &[S],
) -> Result<String, MessageError> {
    if args.len() < template.token_count() {
        return Err(MessageError::ArgumentCount {
            required: template.token_count(),
            supplied: args.len(),
        });
    }

    let mut state = FormattingState::new();
    let mut out = String::new();
    let mut args = args.iter();

    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => {
                state.scan(text);
                out.push_str(text);
            }
            Segment::Token(directive) => {
                // Length was checked above.
                let Some(value) = args.next() else { break };
                let value = value.as_ref();
                match directive {
                    None => out.push_str(value),
                    Some(directive) => {
                        out.push_str(RESET);
                        out.push_str(directive);
                        out.push_str(value);
                        out.push_str(RESET);
                        // The reset + restore pair leaves the display where it
                        // was before the token, so `state` stays as is.
                        out.push_str(&state.restore_prefix());
                    }
                }
            }
        }
    }

    Ok(format::translate(&out))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
