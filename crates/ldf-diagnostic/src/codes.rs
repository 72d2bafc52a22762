//! Error codes for LDF diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Lexer errors (E0001 - E0099)
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedComment,

    // Parser errors (E0100 - E0199)
    UnexpectedToken,
    InvalidNumber,
    MissingSemicolon,
    DuplicateConfigurableFrames,
    UnexpectedEof,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnexpectedCharacter => "E0001",
            ErrorCode::UnterminatedString => "E0002",
            ErrorCode::UnterminatedComment => "E0003",

            // Parser
            ErrorCode::UnexpectedToken => "E0100",
            ErrorCode::InvalidNumber => "E0101",
            ErrorCode::MissingSemicolon => "E0102",
            ErrorCode::DuplicateConfigurableFrames => "E0103",
            ErrorCode::UnexpectedEof => "E0104",
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedCharacter => "unexpected character in input",
            ErrorCode::UnterminatedString => "string literal is not terminated",
            ErrorCode::UnterminatedComment => "block comment is not terminated",
            ErrorCode::UnexpectedToken => "unexpected token",
            ErrorCode::InvalidNumber => "number literal cannot be represented",
            ErrorCode::MissingSemicolon => "missing semicolon",
            ErrorCode::DuplicateConfigurableFrames => {
                "node declares `configurable_frames` more than once"
            }
            ErrorCode::UnexpectedEof => "unexpected end of input",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::UnterminatedString => Some("add a closing quote `\"` to terminate the string"),
            ErrorCode::UnterminatedComment => Some("add `*/` to close the comment"),
            ErrorCode::MissingSemicolon => Some("add `;` at the end of the statement"),
            ErrorCode::DuplicateConfigurableFrames => {
                Some("list every frame in a single `configurable_frames { ... }` block")
            }
            ErrorCode::UnexpectedEof => Some("check for a missing closing `}`"),
            _ => None,
        }
    }

    /// Whether this code comes from the tokenizer.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            ErrorCode::UnexpectedCharacter
                | ErrorCode::UnterminatedString
                | ErrorCode::UnterminatedComment
        )
    }
}
