//! The `ldf parse` command.
//! `ldf parse` 命令。

use crate::commands::report;
use crate::output;
use ldf_parser::{ParseOptions, parse_with, read_source};

/// Parse an LDF file and print the document as JSON.
/// 解析 LDF 文件并以 JSON 输出文档。
///
/// A document that parsed with recovered errors is still printed; the
/// command fails afterwards.
pub fn run(file: &str, debug: bool, compact: bool, quiet: bool) -> Result<(), String> {
    let source = read_source(file).map_err(|e| e.to_string())?;
    let result = parse_with(&source, &ParseOptions::new().debug(debug));

    report(&source, file, &result);

    let Some(document) = &result.document else {
        return Err("parsing aborted at end of input".to_string());
    };

    let json = document
        .to_json_string(!compact)
        .map_err(|e| format!("cannot serialize document: {e}"))?;
    println!("{json}");

    if !result.is_ok() {
        if !quiet {
            output::error(&format!("{} error(s) found", result.error_count));
        }
        return Err("parse error".to_string());
    }

    Ok(())
}
