//! The `ldf check` command.
//! `ldf check` 命令。

use crate::commands::report;
use crate::output;
use ldf_parser::{ParseOptions, parse_with, read_source};

/// Parse an LDF file and report diagnostics only.
/// 解析 LDF 文件，仅报告诊断信息。
pub fn run(file: &str, debug: bool, verbose: bool, quiet: bool) -> Result<(), String> {
    let source = read_source(file).map_err(|e| e.to_string())?;
    let result = parse_with(&source, &ParseOptions::new().debug(debug));

    report(&source, file, &result);

    if result.fatal {
        output::error("syntax error at end of input, no document produced");
        return Err("parse error".to_string());
    }

    if !result.is_ok() {
        output::error(&format!("{} error(s) found", result.error_count));
        return Err("parse error".to_string());
    }

    if verbose && let Some(document) = &result.document {
        let sections: Vec<&str> = document.keys().collect();
        output::info(&format!(
            "{} top-level entries: {}",
            document.len(),
            sections.join(", ")
        ));
    }

    if !quiet {
        output::success("OK - No errors found");
    }
    Ok(())
}
