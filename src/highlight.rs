//! Turns tokenized example lines into styled text.
//!
//! Spacing between words is drawn as left padding on the following token, in
//! that token's own style, so the codeblock background never breaks between
//! fragments. The first token of a line gets no padding unless the line
//! continues a previous one, in which case it is indented by two columns.

use crate::layout::StyledBlock;
use crate::theme::{Codeblock, Slot};
use crate::tokenizer::{ExampleLine, Token, TokenKind};

/// Indentation applied to a line that follows a continuation marker.
pub const CONTINUATION_INDENT: usize = 2;

/// Maps tokens to styled fragments using the codeblock styles.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter<'a> {
    styles: &'a Codeblock,
}

impl<'a> Highlighter<'a> {
    /// Creates a highlighter drawing on the given codeblock styles.
    pub fn new(styles: &'a Codeblock) -> Self {
        Self { styles }
    }

    /// The slot a token kind is drawn with.
    pub fn slot(&self, kind: TokenKind) -> &'a Slot {
        let program = &self.styles.program;
        match kind {
            TokenKind::ProgramName => &program.name,
            TokenKind::SubCommand => &program.command,
            TokenKind::Flag => &program.flag,
            TokenKind::FlagValue | TokenKind::Argument => &program.argument,
            TokenKind::QuotedFragment => &program.quoted_string,
            TokenKind::Continuation => &program.dimmed_argument,
            TokenKind::Comment => &self.styles.comment,
        }
    }

    /// Renders one line of tokens.
    ///
    /// Quoted fragments never carry trailing padding, so a closing fragment
    /// does not leak its style into the gap before the next token.
    pub fn render(&self, tokens: &[Token], indent: bool) -> StyledBlock {
        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            let padding = match (i, token.attached) {
                (0, _) if indent => CONTINUATION_INDENT,
                (0, _) | (_, true) => 0,
                _ => 1,
            };
            let slot = self
                .slot(token.kind)
                .merge(&Slot::new().padding_left(padding).padding_right(0));
            out.push_str(&slot.render(&token.text));
        }
        StyledBlock::new(out)
    }

    /// Renders a tokenized example block, one block per line.
    pub fn render_example(&self, lines: &[ExampleLine]) -> Vec<StyledBlock> {
        lines
            .iter()
            .map(|line| self.render(&line.tokens, line.indent))
            .collect()
    }
}
