//! Token definitions for LDF.

use ldf_common::Span;
use std::fmt;

/// A token with its kind, span and source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line the token starts on.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, line: u32) -> Self {
        Self { kind, span, line }
    }
}

/// The kind of a token.
///
/// Numeric literals keep their raw text; they are coerced where the parser
/// turns them into values.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Decimal or `0x`-prefixed hexadecimal integer.
    Integer(String),
    /// Floating point literal (`1.5`, `2.0e3`, `1e3`).
    Digit(String),
    /// Text between double quotes, verbatim.
    Str(String),
    Ident(String),

    // Section keywords
    Nodes,
    Master,
    Slaves,
    Signals,
    DiagnosticSignals,
    Frames,
    DiagnosticFrames,
    NodeAttributes,
    ScheduleTables,
    SignalEncodingTypes,
    SignalRepresentation,

    // Statement keywords
    ConfigurableFrames,
    Delay,
    Ms,
    Kbps,

    // Punctuation
    Eq,        // =
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Caret,     // ^
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Lt,        // <
    LtEq,      // <=
    Gt,        // >
    GtEq,      // >=
    LtGt,      // <>
    Colon,     // :
    Comma,     // ,
    Semicolon, // ;
    Pipe,      // |
    Amp,       // &
    At,        // @

    Eof,
}

impl TokenKind {
    /// Returns the keyword for an identifier, if any.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "Nodes" => Some(TokenKind::Nodes),
            "Master" => Some(TokenKind::Master),
            "Slaves" => Some(TokenKind::Slaves),
            "Signals" => Some(TokenKind::Signals),
            "Diagnostic_signals" => Some(TokenKind::DiagnosticSignals),
            "Frames" => Some(TokenKind::Frames),
            "Diagnostic_frames" => Some(TokenKind::DiagnosticFrames),
            "Node_attributes" => Some(TokenKind::NodeAttributes),
            "Schedule_tables" => Some(TokenKind::ScheduleTables),
            "Signal_encoding_types" => Some(TokenKind::SignalEncodingTypes),
            "Signal_representation" => Some(TokenKind::SignalRepresentation),
            "configurable_frames" => Some(TokenKind::ConfigurableFrames),
            "delay" => Some(TokenKind::Delay),
            "ms" => Some(TokenKind::Ms),
            "kbps" => Some(TokenKind::Kbps),
            _ => None,
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.is_section_keyword()
            || matches!(
                self,
                TokenKind::ConfigurableFrames
                    | TokenKind::Delay
                    | TokenKind::Ms
                    | TokenKind::Kbps
            )
    }

    /// Returns true for keywords that open a top-level section block.
    pub fn is_section_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Nodes
                | TokenKind::Signals
                | TokenKind::DiagnosticSignals
                | TokenKind::Frames
                | TokenKind::DiagnosticFrames
                | TokenKind::NodeAttributes
                | TokenKind::ScheduleTables
                | TokenKind::SignalEncodingTypes
                | TokenKind::SignalRepresentation
        )
    }

    /// Grammar-level name of the token class, as shown in syntax errors.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Integer(_) => "INTEGER",
            TokenKind::Digit(_) => "DIGIT",
            TokenKind::Str(_) => "STR",
            TokenKind::Ident(_) => "ID",
            TokenKind::Eof => "EOF",
            kind if kind.is_keyword() => "KEYWORD",
            _ => "PUNCT",
        }
    }

    /// Source text of the token (literal value, keyword or symbol).
    pub fn text(&self) -> &str {
        match self {
            TokenKind::Integer(s)
            | TokenKind::Digit(s)
            | TokenKind::Str(s)
            | TokenKind::Ident(s) => s,
            TokenKind::Nodes => "Nodes",
            TokenKind::Master => "Master",
            TokenKind::Slaves => "Slaves",
            TokenKind::Signals => "Signals",
            TokenKind::DiagnosticSignals => "Diagnostic_signals",
            TokenKind::Frames => "Frames",
            TokenKind::DiagnosticFrames => "Diagnostic_frames",
            TokenKind::NodeAttributes => "Node_attributes",
            TokenKind::ScheduleTables => "Schedule_tables",
            TokenKind::SignalEncodingTypes => "Signal_encoding_types",
            TokenKind::SignalRepresentation => "Signal_representation",
            TokenKind::ConfigurableFrames => "configurable_frames",
            TokenKind::Delay => "delay",
            TokenKind::Ms => "ms",
            TokenKind::Kbps => "kbps",
            TokenKind::Eq => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Caret => "^",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::LtGt => "<>",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Pipe => "|",
            TokenKind::Amp => "&",
            TokenKind::At => "@",
            TokenKind::Eof => "",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Str(s) => write!(f, "STR (\"{s}\")"),
            kind => write!(f, "{} ({})", kind.name(), kind.text()),
        }
    }
}
