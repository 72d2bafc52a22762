//! Integration tests for ldf-common and ldf-diagnostic crates.

use ldf_common::{BytePos, LineIndex, Span};
use ldf_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label, render};

#[test]
fn test_span_merge() {
    let a = Span::from_usize(10, 20);
    let b = Span::from_usize(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged.start.0, 10);
    assert_eq!(merged.end.0, 30);
}

#[test]
fn test_span_range() {
    let span = Span::from_usize(5, 15);
    assert_eq!(span.range(), 5..15);
    assert_eq!(span.len(), 10);
    assert!(Span::from_usize(5, 5).is_empty());
}

#[test]
fn test_line_index_columns() {
    let source = "LIN_speed = 19.2 kbps;\nNodes {\n}";
    let index = LineIndex::new(source);
    let nodes = source.find("Nodes").unwrap() as u32;
    assert_eq!(index.line_col(BytePos(nodes)), (2, 1));
    assert_eq!(index.line_col(BytePos(nodes + 6)), (2, 7));
    assert_eq!(index.line_count(), 3);
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(
        DiagnosticKind::Parser,
        Span::from_usize(0, 5),
        "syntax error at token ID (Nodez) on line 1",
    )
    .with_code(ErrorCode::UnexpectedToken)
    .with_line(1);
    assert_eq!(
        diag.to_string(),
        "error[E0100]: syntax error at token ID (Nodez) on line 1"
    );
    assert!(diag.is_error());
}

#[test]
fn test_with_code_sets_help() {
    let diag = Diagnostic::error(DiagnosticKind::Parser, Span::point(3), "missing `;`")
        .with_code(ErrorCode::MissingSemicolon);
    assert_eq!(diag.help.as_deref(), ErrorCode::MissingSemicolon.suggestion());

    let diag = diag.with_help("custom");
    assert_eq!(diag.help.as_deref(), Some("custom"));
}

#[test]
fn test_render_plain() {
    let source = "LIN_speed = 19.2 kbps\nNodes { }";
    let span = Span::from_usize(22, 27);
    let diag = Diagnostic::error(DiagnosticKind::Parser, span, "syntax error")
        .with_code(ErrorCode::MissingSemicolon)
        .with_label(Label::new(span, "expected `;`"));

    let text = render(source, "bus.ldf", &diag).unwrap();
    assert!(text.contains("E0102"));
    assert!(text.contains("syntax error"));
    assert!(text.contains("expected `;`"));
    assert!(text.contains("bus.ldf"));
}
