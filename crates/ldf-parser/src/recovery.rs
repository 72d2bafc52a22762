//! Panic-mode recovery support for the parser.
//!
//! A failed top-level object is abandoned and tokens are discarded up to the
//! next statement boundary. The tokenizer never emits newline tokens, so
//! boundaries are the statement terminators of the grammar itself.

use ldf_lexer::TokenKind;

/// Check if a token ends a statement.
pub(crate) fn is_stmt_end(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Semicolon | TokenKind::RBrace)
}

/// Check if a token is a synchronization point: a section keyword can only
/// start a new top-level object, whatever the current nesting.
pub(crate) fn is_sync_token(kind: &TokenKind) -> bool {
    kind.is_section_keyword()
}

/// Counts the `{` blocks opened by the object being parsed.
///
/// Braces are the only nesting in the grammar; other brackets are plain
/// punctuation and never change the depth.
#[derive(Debug, Default)]
pub(crate) struct BraceDepth {
    depth: usize,
}

impl BraceDepth {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.depth = 0;
    }

    pub(crate) fn is_balanced(&self) -> bool {
        self.depth == 0
    }

    /// Update the depth with a consumed token. A `}` with no open block is ignored.
    pub(crate) fn update(&mut self, token: &TokenKind) {
        match token {
            TokenKind::LBrace => self.depth += 1,
            TokenKind::RBrace => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_tokens() {
        assert!(is_sync_token(&TokenKind::Frames));
        assert!(is_sync_token(&TokenKind::SignalRepresentation));
        assert!(!is_sync_token(&TokenKind::Master));
        assert!(is_stmt_end(&TokenKind::Semicolon));
        assert!(is_stmt_end(&TokenKind::RBrace));
        assert!(!is_stmt_end(&TokenKind::Comma));
    }

    #[test]
    fn test_brace_depth() {
        let mut braces = BraceDepth::new();
        assert!(braces.is_balanced());

        braces.update(&TokenKind::LBrace);
        braces.update(&TokenKind::LBrace);
        braces.update(&TokenKind::RBrace);
        assert!(!braces.is_balanced());

        braces.update(&TokenKind::RBrace);
        assert!(braces.is_balanced());

        braces.update(&TokenKind::RBrace);
        assert!(braces.is_balanced());
    }

    #[test]
    fn test_other_brackets_do_not_nest() {
        let mut braces = BraceDepth::new();
        for kind in [
            TokenKind::LParen,
            TokenKind::LBracket,
            TokenKind::Lt,
            TokenKind::RParen,
            TokenKind::RBracket,
        ] {
            braces.update(&kind);
        }
        assert!(braces.is_balanced());
    }
}
