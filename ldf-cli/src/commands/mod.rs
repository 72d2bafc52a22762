//! CLI command implementations.

pub mod check;
pub mod parse;
pub mod tokens;

use crate::output;
use ldf_diagnostic::emit;
use ldf_parser::ParseResult;

/// Render every diagnostic of a parse against its source.
pub(crate) fn report(source: &str, file: &str, result: &ParseResult) {
    for diag in &result.diagnostics {
        if let Err(e) = emit(source, file, diag) {
            output::error(&format!("cannot render diagnostic: {e}"));
        }
    }
}
