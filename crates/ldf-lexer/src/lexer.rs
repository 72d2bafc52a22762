//! The LDF lexer.
//! LDF 词法分析器。

use crate::token::{Token, TokenKind};
use ldf_common::Span;
use ldf_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use tracing::trace;

/// The LDF lexer.
/// LDF 词法分析器。
///
/// Converts LDF text into a sequence of tokens. A lexer is consumed by
/// [`Lexer::tokenize`], so every call works on fresh state.
/// 将 LDF 文本转换为 token 序列。每次调用都使用全新的状态。
pub struct Lexer<'src> {
    /// Source text / 源文本
    source: &'src str,
    /// Current byte offset / 当前字节偏移
    pos: usize,
    /// Current 1-based line / 当前行号（从 1 开始）
    line: u32,
    /// Collected lexical errors / 收集的词法错误
    diagnostics: Vec<Diagnostic>,
    /// Emit a trace event per token / 为每个 token 输出跟踪事件
    trace: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    /// 为给定的源文本创建新的词法分析器。
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            diagnostics: Vec::new(),
            trace: false,
        }
    }

    /// Enable per-token trace events.
    /// 启用逐 token 的跟踪事件。
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Tokenize the entire source and return tokens and diagnostics.
    /// 对整个源文本进行词法分析，返回 token 列表和诊断信息。
    ///
    /// The token list always ends with a single `Eof` token.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            if self.trace {
                trace!(line = token.line, span = ?token.span, "token {}", token.kind);
            }
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        (tokens, self.diagnostics)
    }

    /// Produce the next significant token, skipping trivia and bad characters.
    /// 生成下一个有效 token，跳过空白、注释和非法字符。
    fn next_token(&mut self) -> Token {
        loop {
            self.skip_trivia();

            let start = self.pos;
            let line = self.line;

            let Some(ch) = self.advance() else {
                return Token::new(TokenKind::Eof, Span::point(start), line);
            };

            let kind = match ch {
                '=' => Some(TokenKind::Eq),
                '+' => Some(TokenKind::Plus),
                '-' => Some(TokenKind::Minus),
                '*' => Some(TokenKind::Star),
                '/' => Some(TokenKind::Slash),
                '^' => Some(TokenKind::Caret),
                '(' => Some(TokenKind::LParen),
                ')' => Some(TokenKind::RParen),
                '{' => Some(TokenKind::LBrace),
                '}' => Some(TokenKind::RBrace),
                '[' => Some(TokenKind::LBracket),
                ']' => Some(TokenKind::RBracket),
                ':' => Some(TokenKind::Colon),
                ',' => Some(TokenKind::Comma),
                ';' => Some(TokenKind::Semicolon),
                '|' => Some(TokenKind::Pipe),
                '&' => Some(TokenKind::Amp),
                '@' => Some(TokenKind::At),

                // <, <=, <>
                '<' => Some(match self.peek_char() {
                    Some('=') => {
                        self.advance();
                        TokenKind::LtEq
                    }
                    Some('>') => {
                        self.advance();
                        TokenKind::LtGt
                    }
                    _ => TokenKind::Lt,
                }),

                // >, >=
                '>' => Some(if self.eat_char('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }),

                // String literal - 字符串字面量
                '"' => self.string_literal(start, line),

                // Numbers - 数字
                '0'..='9' => Some(self.number(ch)),

                // Identifiers and keywords - 标识符和关键字
                'a'..='z' | 'A'..='Z' | '_' => Some(self.identifier(start)),

                _ => {
                    self.error_unexpected_char(ch, start, line);
                    None
                }
            };

            if let Some(kind) = kind {
                return Token::new(kind, Span::from_usize(start, self.pos), line);
            }
        }
    }

    /// Advance to the next character, tracking newlines.
    /// 前进到下一个字符，并跟踪换行。
    fn advance(&mut self) -> Option<char> {
        let ch = self.source[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Peek at the next character without consuming it.
    /// 查看下一个字符但不消耗它。
    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Peek at the nth character ahead.
    /// 查看前方第 n 个字符。
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    fn eat_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and comments.
    /// 跳过空白字符和注释。
    fn skip_trivia(&mut self) {
        loop {
            match (self.peek_char(), self.peek_nth(1)) {
                (Some(ch), _) if ch.is_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => self.skip_line_comment(),
                (Some('/'), Some('*')) => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    /// Skip a line comment (`//` to end of line).
    /// 跳过行注释（`//` 到行尾）。
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a block comment (`/* ... */`).
    /// 跳过块注释（`/* ... */`）。
    fn skip_block_comment(&mut self) {
        let start = self.pos;
        let line = self.line;
        self.advance(); // /
        self.advance(); // *

        loop {
            match self.advance() {
                Some('*') if self.peek_char() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
                None => {
                    let span = Span::from_usize(start, start + 2);
                    self.diagnostics.push(
                        Diagnostic::error(
                            DiagnosticKind::Lexer,
                            span,
                            format!("unterminated block comment starting on line {line}"),
                        )
                        .with_code(ErrorCode::UnterminatedComment)
                        .with_line(line)
                        .with_label(Label::new(span, "comment starts here")),
                    );
                    return;
                }
            }
        }
    }

    /// Scan a double-quoted string; the opening quote is already consumed.
    /// 扫描双引号字符串；起始引号已被消耗。
    ///
    /// On a missing closing quote only the opening quote is skipped and
    /// scanning resumes right after it.
    fn string_literal(&mut self, start: usize, line: u32) -> Option<TokenKind> {
        let body_start = self.pos;

        loop {
            match self.advance() {
                Some('"') => {
                    let body = &self.source[body_start..self.pos - 1];
                    return Some(TokenKind::Str(body.to_string()));
                }
                Some('\\') => {
                    self.advance();
                }
                Some(_) => {}
                None => break,
            }
        }

        // Rewind to just after the opening quote.
        // 回退到起始引号之后。
        self.pos = body_start;
        self.line = line;

        let span = Span::from_usize(start, body_start);
        self.diagnostics.push(
            Diagnostic::error(
                DiagnosticKind::Lexer,
                span,
                format!("illegal character '\"' on line {line}: unterminated string"),
            )
            .with_code(ErrorCode::UnterminatedString)
            .with_line(line)
            .with_label(Label::new(span, "string starts here")),
        );
        None
    }

    /// Scan an INTEGER or DIGIT literal, keeping the raw text.
    /// 扫描 INTEGER 或 DIGIT 字面量，保留原始文本。
    fn number(&mut self, first: char) -> TokenKind {
        let start = self.pos - first.len_utf8();

        // Hexadecimal - 十六进制
        if first == '0'
            && matches!(self.peek_char(), Some('x' | 'X'))
            && self.peek_nth(1).is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.advance();
            while self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            return TokenKind::Integer(self.source[start..self.pos].to_string());
        }

        self.skip_digits();
        let mut is_float = false;

        // Fraction - 小数部分
        if self.peek_char() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.skip_digits();
            is_float = true;
        }

        // Exponent - 指数部分
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let digits_at = match self.peek_nth(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_nth(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digits_at {
                    self.advance();
                }
                self.skip_digits();
                is_float = true;
            }
        }

        let text = self.source[start..self.pos].to_string();
        if is_float {
            TokenKind::Digit(text)
        } else {
            TokenKind::Integer(text)
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Scan an identifier or keyword.
    /// 解析标识符或关键字。
    fn identifier(&mut self, start: usize) -> TokenKind {
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let value = &self.source[start..self.pos];
        TokenKind::keyword_from_str(value).unwrap_or_else(|| TokenKind::Ident(value.to_string()))
    }

    /// Report an unexpected character; the character itself is skipped.
    /// 报告意外字符；该字符本身被跳过。
    fn error_unexpected_char(&mut self, ch: char, pos: usize, line: u32) {
        let span = Span::from_usize(pos, self.pos);
        self.diagnostics.push(
            Diagnostic::error(
                DiagnosticKind::Lexer,
                span,
                format!("illegal character '{ch}' on line {line}"),
            )
            .with_code(ErrorCode::UnexpectedCharacter)
            .with_line(line)
            .with_label(Label::new(span, "unexpected character here")),
        );
    }
}
