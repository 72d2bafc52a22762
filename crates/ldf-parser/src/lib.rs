//! Parser for LIN Description Files.
//!
//! This crate turns LDF text into a [`Document`]: a nested map of sections
//! (`Nodes`, `signals`, `frames`, ...) plus top-level attributes such as
//! `LIN_speed`.
//!
//! ## Error Recovery
//!
//! A malformed top-level object is reported, skipped and counted; parsing
//! continues with the next object. Only a syntax error at end of input stops
//! the parse without a document.

mod parser;
mod recovery;

pub use ldf_syntax::{Document, Map, Section, Value};
pub use parser::Parser;

use ldf_diagnostic::Diagnostic;
use ldf_lexer::Lexer;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Options for a single parse.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Echo the input and trace every token and reduction.
    pub debug: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Why a parse did not produce a clean document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{count} error(s) while parsing")]
    Syntax { count: usize },
    #[error("syntax error at end of input (line {line})")]
    Fatal { line: u32 },
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one parse call.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// `None` only when parsing stopped on an error at end of input.
    pub document: Option<Document>,
    /// Lexical and syntax diagnostics in source order of discovery.
    pub diagnostics: Vec<Diagnostic>,
    /// Lexical errors plus recovered syntax errors.
    pub error_count: usize,
    pub fatal: bool,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.error_count == 0 && !self.fatal
    }

    /// The document, if the parse finished without any error.
    pub fn into_result(self) -> Result<Document, ParseError> {
        if self.fatal {
            let line = self.diagnostics.last().map_or(0, |diag| diag.line);
            return Err(ParseError::Fatal { line });
        }
        match self.document {
            Some(document) if self.error_count == 0 => Ok(document),
            _ => Err(ParseError::Syntax {
                count: self.error_count,
            }),
        }
    }
}

/// Parse LDF source with default options.
pub fn parse(source: &str) -> ParseResult {
    parse_with(source, &ParseOptions::default())
}

/// Parse LDF source.
pub fn parse_with(source: &str, options: &ParseOptions) -> ParseResult {
    if options.debug {
        debug!(bytes = source.len(), "input:\n{source}");
    }

    let lexer = Lexer::new(source).with_trace(options.debug);
    let (tokens, mut diagnostics) = lexer.tokenize();
    let lexical_errors = diagnostics.len();

    let mut parser = Parser::new(tokens).with_trace(options.debug);
    let document = parser.parse_document();
    let error_count = lexical_errors + parser.error_count();
    let fatal = parser.is_fatal();

    diagnostics.extend(parser.diagnostics());
    debug!(error_count, fatal, "parse finished");

    ParseResult {
        document,
        diagnostics,
        error_count,
        fatal,
    }
}

/// Read a file as UTF-8 text.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, ParseError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse an LDF file.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<ParseResult, ParseError> {
    let source = read_source(path)?;
    Ok(parse_with(&source, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute() {
        let result = parse("LIN_protocol_version = \"2.1\";");
        assert!(result.is_ok());
        let document = result.into_result().unwrap();
        assert_eq!(document.get("LIN_protocol_version"), Some(&Value::from("2.1")));
    }

    #[test]
    fn test_lexical_errors_are_counted() {
        let result = parse("# LIN_speed = 19.2 kbps;");
        assert_eq!(result.error_count, 1);
        assert!(!result.is_ok());
        let document = result.document.clone().unwrap();
        assert_eq!(document.get("LIN_speed"), Some(&Value::Int(19200)));
        assert!(matches!(result.into_result(), Err(ParseError::Syntax { count: 1 })));
    }

    #[test]
    fn test_fatal_into_result() {
        let result = parse("Frames {");
        assert!(result.fatal);
        assert!(result.document.is_none());
        assert!(matches!(result.into_result(), Err(ParseError::Fatal { line: 1 })));
    }

    #[test]
    fn test_debug_has_no_effect_on_document() {
        let source = "Nodes { Master: M, 5 ms, 0.1 ms; Slaves: S1, S2; }";
        let plain = parse(source);
        let debug = parse_with(source, &ParseOptions::new().debug(true));
        assert_eq!(plain.document, debug.document);
        let json = serde_json::to_value(plain.document.unwrap()).unwrap();
        assert_eq!(json["Nodes"]["master"]["jitter"], serde_json::json!(0.1));
    }
}
