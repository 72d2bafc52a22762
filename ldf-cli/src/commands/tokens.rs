//! The `ldf tokens` command.
//! `ldf tokens` 命令。

use crate::output;
use ldf_common::LineIndex;
use ldf_diagnostic::emit;
use ldf_lexer::Lexer;
use ldf_parser::read_source;

/// Print the token stream of a file, one token per line.
/// 逐行打印文件的词法单元流。
pub fn run(file: &str) -> Result<(), String> {
    let source = read_source(file).map_err(|e| e.to_string())?;
    let (tokens, diagnostics) = Lexer::new(&source).tokenize();
    let index = LineIndex::new(&source);

    for token in &tokens {
        let col = index.column(token.span.start);
        println!("{}:{col}\t{}\t{}", token.line, token.kind.name(), token.kind.text());
    }

    for diag in &diagnostics {
        if let Err(e) = emit(&source, file, diag) {
            output::error(&format!("cannot render diagnostic: {e}"));
        }
    }

    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(format!("{} lexical error(s) found", diagnostics.len()))
    }
}
