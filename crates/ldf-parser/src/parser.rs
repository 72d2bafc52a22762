//! The LDF parser.
//!
//! Each production function consumes tokens and returns the finished value
//! shape for that construct; there is no intermediate syntax tree. A
//! production that fails returns `Err(Bail)` after recording a diagnostic,
//! and `?` carries the failure up to [`Parser::parse_document`], which
//! abandons the whole top-level object and resynchronizes.

use ldf_common::Span;
use ldf_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use ldf_lexer::{Token, TokenKind};
use ldf_syntax::{Document, Map, Section, Value, coerce, scale_kbps};
use tracing::{debug, trace, warn};

use crate::recovery::{BraceDepth, is_stmt_end, is_sync_token};

/// Marker for a production that failed; the diagnostic is already recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bail;

type PResult<T> = Result<T, Bail>;

/// One top-level construct, ready to merge into the document.
#[derive(Debug)]
enum Object {
    Attribute(String, Value),
    Section(Section, Value),
}

/// The LDF parser.
///
/// Owns its token buffer, diagnostics and error counter; build one per parse.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    /// Blocks opened by the current top-level object
    braces: BraceDepth,
    /// Recovered syntax errors
    error_count: usize,
    /// Set when a syntax error hits the end of input
    fatal: bool,
    trace: bool,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end.0 as usize);
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenKind::Eof, Span::point(end), line));
        }

        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
            braces: BraceDepth::new(),
            error_count: 0,
            fatal: false,
            trace: false,
        }
    }

    /// Log every reduction at trace level.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Number of syntax errors recovered from so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Whether parsing stopped on an error at end of input.
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// Parse every top-level object into a document.
    ///
    /// Returns `None` when a syntax error hits the end of input. Otherwise
    /// the document holds every object that parsed cleanly; check
    /// [`Parser::error_count`] for the ones that did not.
    pub fn parse_document(&mut self) -> Option<Document> {
        let mut document = Document::new();

        while !self.at_end() {
            let start = self.pos;
            self.braces.clear();

            match self.parse_object() {
                Ok(Object::Attribute(name, value)) => {
                    if self.trace {
                        debug!(%name, ?value, "attribute");
                    }
                    document.merge(name, value);
                }
                Ok(Object::Section(section, content)) => {
                    if self.trace {
                        debug!(%section, entries = content.as_map().map_or(0, Map::len), "section");
                    }
                    document.merge_section(section, content);
                }
                Err(Bail) if self.fatal => return None,
                Err(Bail) => {
                    self.error_count += 1;
                    self.synchronize(start);
                }
            }
        }

        Some(document)
    }

    fn parse_object(&mut self) -> PResult<Object> {
        let object = match self.current_kind() {
            TokenKind::Ident(_) => {
                let (name, value) = self.parse_attribute()?;
                Object::Attribute(name, value)
            }
            TokenKind::Nodes => Object::Section(Section::Nodes, self.parse_nodes()?),
            TokenKind::Signals => Object::Section(Section::Signals, self.parse_signals()?),
            TokenKind::DiagnosticSignals => {
                Object::Section(Section::DiagSignals, self.parse_diag_signals()?)
            }
            TokenKind::Frames => Object::Section(Section::Frames, self.parse_frames()?),
            TokenKind::DiagnosticFrames => {
                Object::Section(Section::DiagnosticFrames, self.parse_diag_frames()?)
            }
            TokenKind::NodeAttributes => {
                Object::Section(Section::NodeAttributes, self.parse_node_attributes()?)
            }
            TokenKind::ScheduleTables => {
                Object::Section(Section::ScheduleTables, self.parse_schedule_tables()?)
            }
            TokenKind::SignalEncodingTypes => {
                Object::Section(Section::SignalEncodingTypes, self.parse_encoding_types()?)
            }
            TokenKind::SignalRepresentation => {
                Object::Section(Section::SignalRepresentation, self.parse_representations()?)
            }
            _ => return Err(self.unexpected("an attribute or a section")),
        };
        Ok(object)
    }

    // ========== Attributes ==========

    /// `ID ;` | `ID = value ;` with the value forms:
    /// `STR`, `ID`, number, number `ms`, number `kbps`, `INTEGER , INTEGER ...`.
    fn parse_attribute(&mut self) -> PResult<(String, Value)> {
        let name = self.expect_ident()?;

        if self.eat(TokenKind::Semicolon) {
            self.reduce("attribute -> ID ;");
            return Ok((name, Value::Str(String::new())));
        }

        self.expect(TokenKind::Eq, "`=` or `;`")?;

        let value = match self.current_kind().clone() {
            TokenKind::Str(text) => {
                self.advance();
                self.reduce("attribute -> ID = STR ;");
                Value::Str(text)
            }
            TokenKind::Ident(text) => {
                self.advance();
                self.reduce("attribute -> ID = ID ;");
                Value::Str(text)
            }
            TokenKind::Integer(_) | TokenKind::Digit(_) => {
                let is_integer = matches!(self.current_kind(), TokenKind::Integer(_));
                let number = self.parse_number()?;

                if self.eat(TokenKind::Ms) {
                    self.reduce("attribute -> ID = number ms ;");
                    number
                } else if self.eat(TokenKind::Kbps) {
                    self.reduce("attribute -> ID = number kbps ;");
                    scale_kbps(number)
                } else if is_integer && self.check(&TokenKind::Comma) {
                    let mut items = vec![number];
                    while self.eat(TokenKind::Comma) {
                        items.push(self.parse_integer()?);
                    }
                    self.reduce("attribute -> ID = ints ;");
                    Value::List(items)
                } else {
                    self.reduce("attribute -> ID = number ;");
                    number
                }
            }
            _ => return Err(self.unexpected("an attribute value")),
        };

        self.expect_semicolon()?;
        Ok((name, value))
    }

    // ========== Nodes ==========

    /// `Nodes { Master : ID , INTEGER ms , number ms ; Slaves : id_list ; }`
    fn parse_nodes(&mut self) -> PResult<Value> {
        self.expect(TokenKind::Nodes, "`Nodes`")?;
        self.open_block()?;

        let mut nodes = Map::new();
        loop {
            match self.current_kind() {
                TokenKind::Master => {
                    self.advance();
                    self.expect(TokenKind::Colon, "`:`")?;
                    let name = self.expect_ident()?;
                    self.expect(TokenKind::Comma, "`,`")?;
                    let time_base = self.parse_integer()?;
                    self.expect(TokenKind::Ms, "`ms`")?;
                    self.expect(TokenKind::Comma, "`,`")?;
                    let jitter = self.parse_number()?;
                    self.expect(TokenKind::Ms, "`ms`")?;
                    self.expect_semicolon()?;

                    let master: Map = [
                        ("name", Value::Str(name)),
                        ("time_base", time_base),
                        ("jitter", jitter),
                    ]
                    .into_iter()
                    .collect();
                    nodes.merge_entry("master", master);
                    self.reduce("master -> Master : ID , INTEGER ms , number ms ;");
                }
                TokenKind::Slaves => {
                    self.advance();
                    self.expect(TokenKind::Colon, "`:`")?;
                    let slaves = self.parse_id_list()?;
                    self.expect_semicolon()?;
                    nodes.merge_entry("slaves", slaves);
                    self.reduce("slaves -> Slaves : id_list ;");
                }
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected("`Master`, `Slaves` or `}`")),
            }
        }

        self.reduce("nodes -> Nodes { ... }");
        Ok(Value::Map(nodes))
    }

    // ========== Signals ==========

    /// `Signals { (ID : INTEGER , init , ID [, id_list] ;)* }`
    fn parse_signals(&mut self) -> PResult<Value> {
        self.expect(TokenKind::Signals, "`Signals`")?;
        self.open_block()?;

        let mut signals = Map::new();
        while !self.close_block() {
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon, "`:`")?;
            let size = self.parse_integer()?;
            self.expect(TokenKind::Comma, "`,`")?;
            let initial = self.parse_initial_value()?;
            self.expect(TokenKind::Comma, "`,`")?;
            let publisher = self.expect_ident()?;
            let subscriber = if self.eat(TokenKind::Comma) {
                self.parse_id_list()?
            } else {
                Value::List(Vec::new())
            };
            self.expect_semicolon()?;

            let signal: Map = [
                ("size", size),
                ("initial", initial),
                ("publisher", Value::Str(publisher)),
                ("subscriber", subscriber),
            ]
            .into_iter()
            .collect();
            signals.merge_entry(name, signal);
            self.reduce("signal -> ID : INTEGER , init , ID [, id_list] ;");
        }

        Ok(Value::Map(signals))
    }

    /// `Diagnostic_signals { (ID : INTEGER , init ;)* }`
    fn parse_diag_signals(&mut self) -> PResult<Value> {
        self.expect(TokenKind::DiagnosticSignals, "`Diagnostic_signals`")?;
        self.open_block()?;

        let mut signals = Map::new();
        while !self.close_block() {
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon, "`:`")?;
            let size = self.parse_integer()?;
            self.expect(TokenKind::Comma, "`,`")?;
            let initial = self.parse_initial_value()?;
            self.expect_semicolon()?;

            let signal: Map = [("size", size), ("initial", initial)].into_iter().collect();
            signals.merge_entry(name, signal);
            self.reduce("diag_signal -> ID : INTEGER , init ;");
        }

        Ok(Value::Map(signals))
    }

    /// `INTEGER` or a byte-array initializer `{ INTEGER , ... }`.
    fn parse_initial_value(&mut self) -> PResult<Value> {
        if !self.check(&TokenKind::LBrace) {
            return self.parse_integer();
        }

        self.open_block()?;
        let mut bytes = vec![self.parse_integer()?];
        while self.eat(TokenKind::Comma) {
            bytes.push(self.parse_integer()?);
        }
        if !self.close_block() {
            return Err(self.unexpected("`,` or `}`"));
        }
        self.reduce("init -> { ints }");
        Ok(Value::List(bytes))
    }

    // ========== Frames ==========

    /// `Frames { (ID : INTEGER , ID , INTEGER { frame_signal* } [;])* }`
    fn parse_frames(&mut self) -> PResult<Value> {
        self.expect(TokenKind::Frames, "`Frames`")?;
        self.open_block()?;

        let mut frames = Map::new();
        while !self.close_block() {
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon, "`:`")?;
            let id = self.parse_integer()?;
            self.expect(TokenKind::Comma, "`,`")?;
            let publisher = self.expect_ident()?;
            self.expect(TokenKind::Comma, "`,`")?;
            let dlc = self.parse_integer()?;
            let signals = self.parse_frame_signals()?;
            self.eat(TokenKind::Semicolon);

            let frame: Map = [
                ("id", id),
                ("publisher", Value::Str(publisher)),
                ("dlc", dlc),
                ("signals", signals),
            ]
            .into_iter()
            .collect();
            frames.merge_entry(name, frame);
            self.reduce("frame -> ID : INTEGER , ID , INTEGER { frame_signal* }");
        }

        Ok(Value::Map(frames))
    }

    /// `Diagnostic_frames { (ID : INTEGER { frame_signal* } [;])* }`
    fn parse_diag_frames(&mut self) -> PResult<Value> {
        self.expect(TokenKind::DiagnosticFrames, "`Diagnostic_frames`")?;
        self.open_block()?;

        let mut frames = Map::new();
        while !self.close_block() {
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon, "`:`")?;
            let id = self.parse_integer()?;
            let signals = self.parse_frame_signals()?;
            self.eat(TokenKind::Semicolon);

            let frame: Map = [("id", id), ("signals", signals)].into_iter().collect();
            frames.merge_entry(name, frame);
            self.reduce("diag_frame -> ID : INTEGER { frame_signal* }");
        }

        Ok(Value::Map(frames))
    }

    /// `{ (ID , INTEGER ;)* }` mapping each signal to `{start}`.
    fn parse_frame_signals(&mut self) -> PResult<Value> {
        self.open_block()?;

        let mut signals = Map::new();
        while !self.close_block() {
            let name = self.expect_ident()?;
            self.expect(TokenKind::Comma, "`,`")?;
            let start = self.parse_integer()?;
            self.expect_semicolon()?;

            let placement: Map = [("start", start)].into_iter().collect();
            signals.merge_entry(name, placement);
            self.reduce("frame_signal -> ID , INTEGER ;");
        }

        Ok(Value::Map(signals))
    }

    // ========== Node attributes ==========

    /// `Node_attributes { (ID { (attribute | configurable_frames)* })* }`
    fn parse_node_attributes(&mut self) -> PResult<Value> {
        self.expect(TokenKind::NodeAttributes, "`Node_attributes`")?;
        self.open_block()?;

        let mut nodes = Map::new();
        while !self.close_block() {
            let node = self.expect_ident()?;
            self.open_block()?;

            let mut attributes = Map::new();
            let mut seen_configurable = None;
            loop {
                match self.current_kind() {
                    TokenKind::Ident(_) => {
                        let (name, value) = self.parse_attribute()?;
                        attributes.merge_entry(name, value);
                    }
                    TokenKind::ConfigurableFrames => {
                        let span = self.current_span();
                        if let Some(first) = seen_configurable {
                            return Err(self.duplicate_configurable_frames(&node, first, span));
                        }
                        seen_configurable = Some(span);
                        let frames = self.parse_configurable_frames()?;
                        attributes.merge_entry("configurable_frames", frames);
                    }
                    TokenKind::RBrace => {
                        self.advance();
                        break;
                    }
                    _ => return Err(self.unexpected("a node attribute or `}`")),
                }
            }

            nodes.merge_entry(node, attributes);
            self.reduce("node_attr -> ID { node_attr_body }");
        }

        Ok(Value::Map(nodes))
    }

    /// `configurable_frames { (ID [= INTEGER] ;)* } [;]`
    ///
    /// Message ids after `=` are accepted but not kept.
    fn parse_configurable_frames(&mut self) -> PResult<Value> {
        self.expect(TokenKind::ConfigurableFrames, "`configurable_frames`")?;
        self.open_block()?;

        let mut frames = Vec::new();
        while !self.close_block() {
            frames.push(Value::Str(self.expect_ident()?));
            if self.eat(TokenKind::Eq) {
                self.parse_integer()?;
            }
            self.expect_semicolon()?;
        }
        self.eat(TokenKind::Semicolon);

        self.reduce("configurable_frames -> configurable_frames { ID ; ... }");
        Ok(Value::List(frames))
    }

    // ========== Schedule tables ==========

    /// `Schedule_tables { (ID { (ID delay number ms ;)* })* }`
    ///
    /// Entries keep source order and duplicates.
    fn parse_schedule_tables(&mut self) -> PResult<Value> {
        self.expect(TokenKind::ScheduleTables, "`Schedule_tables`")?;
        self.open_block()?;

        let mut tables = Map::new();
        while !self.close_block() {
            let table = self.expect_ident()?;
            self.open_block()?;

            let mut entries = Vec::new();
            while !self.close_block() {
                let frame = self.expect_ident()?;
                self.expect(TokenKind::Delay, "`delay`")?;
                let delay = self.parse_number()?;
                self.expect(TokenKind::Ms, "`ms`")?;
                self.expect_semicolon()?;

                let entry: Map = [("name", Value::Str(frame)), ("delay", delay)]
                    .into_iter()
                    .collect();
                entries.push(Value::Map(entry));
                self.reduce("schentry -> ID delay INTEGER ms ;");
            }

            tables.merge_entry(table, Value::List(entries));
        }

        Ok(Value::Map(tables))
    }

    // ========== Signal encoding types ==========

    /// `Signal_encoding_types { (ID { encoding_attr* })* }`
    fn parse_encoding_types(&mut self) -> PResult<Value> {
        self.expect(TokenKind::SignalEncodingTypes, "`Signal_encoding_types`")?;
        self.open_block()?;

        let mut types = Map::new();
        while !self.close_block() {
            let name = self.expect_ident()?;
            self.open_block()?;

            let mut entries = Vec::new();
            while !self.close_block() {
                entries.push(self.parse_encoding_attr()?);
            }

            types.merge_entry(name, Value::List(entries));
        }

        Ok(Value::Map(types))
    }

    /// `ID , value (, value)* ;` giving `{ID: value}` or `{ID: (v1, v2, ...)}`.
    /// A bare `ID ;` gives `{ID: ""}`.
    fn parse_encoding_attr(&mut self) -> PResult<Value> {
        let name = self.expect_ident()?;

        if self.eat(TokenKind::Semicolon) {
            self.reduce("encoding_attr -> ID ;");
            return Ok(Value::Map([(name, Value::Str(String::new()))].into_iter().collect()));
        }

        self.expect(TokenKind::Comma, "`,` or `;`")?;
        let mut values = vec![self.parse_encoding_value()?];
        while self.eat(TokenKind::Comma) {
            values.push(self.parse_encoding_value()?);
        }
        self.expect_semicolon()?;

        let value = if values.len() == 1 {
            self.reduce("encoding_attr -> ID , value ;");
            values.remove(0)
        } else {
            self.reduce("encoding_attr -> ID , value , value ;");
            Value::Tuple(values)
        };

        Ok(Value::Map([(name, value)].into_iter().collect()))
    }

    /// `INTEGER | DIGIT | STR | - INTEGER | - DIGIT`
    fn parse_encoding_value(&mut self) -> PResult<Value> {
        match self.current_kind().clone() {
            TokenKind::Str(text) => {
                self.advance();
                Ok(Value::Str(text))
            }
            TokenKind::Minus => {
                self.advance();
                if !matches!(self.current_kind(), TokenKind::Integer(_) | TokenKind::Digit(_)) {
                    return Err(self.unexpected("a number after `-`"));
                }
                Ok(self.parse_number()?.negate())
            }
            TokenKind::Integer(_) | TokenKind::Digit(_) => self.parse_number(),
            _ => Err(self.unexpected("a number or string")),
        }
    }

    // ========== Signal representation ==========

    /// `Signal_representation { (ID : id_list ;)* }`
    fn parse_representations(&mut self) -> PResult<Value> {
        self.expect(TokenKind::SignalRepresentation, "`Signal_representation`")?;
        self.open_block()?;

        let mut representations = Map::new();
        while !self.close_block() {
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon, "`:`")?;
            let signals = self.parse_id_list()?;
            self.expect_semicolon()?;

            representations.merge_entry(name, signals);
            self.reduce("representation -> ID : id_list ;");
        }

        Ok(Value::Map(representations))
    }

    // ========== Shared productions ==========

    /// `ID (, ID)*`
    fn parse_id_list(&mut self) -> PResult<Value> {
        let mut ids = vec![Value::Str(self.expect_ident()?)];
        while self.eat(TokenKind::Comma) {
            ids.push(Value::Str(self.expect_ident()?));
        }
        Ok(Value::List(ids))
    }

    fn parse_integer(&mut self) -> PResult<Value> {
        match self.current_kind() {
            TokenKind::Integer(_) => self.parse_number(),
            _ => Err(self.unexpected("an integer")),
        }
    }

    /// `INTEGER | DIGIT`, coerced.
    fn parse_number(&mut self) -> PResult<Value> {
        let raw = match self.current_kind() {
            TokenKind::Integer(raw) | TokenKind::Digit(raw) => raw.clone(),
            _ => return Err(self.unexpected("a number")),
        };

        match coerce(&raw) {
            Ok(value) => {
                self.advance();
                Ok(value)
            }
            Err(err) => {
                let token = self.current().clone();
                self.diagnostics.push(
                    Diagnostic::error(DiagnosticKind::Parser, token.span, err.to_string())
                        .with_code(ErrorCode::InvalidNumber)
                        .with_line(token.line)
                        .with_label(Label::new(token.span, "this literal")),
                );
                warn!(line = token.line, "invalid number literal `{raw}`");
                Err(Bail)
            }
        }
    }

    // ========== Token Helpers ==========

    fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or(&self.tokens[self.tokens.len() - 1])
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Consume the current token, keeping the brace depth in step.
    fn advance(&mut self) {
        if !self.at_end() {
            let kind = self.current_kind().clone();
            self.braces.update(&kind);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(&kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> PResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_semicolon(&mut self) -> PResult<()> {
        if self.eat(TokenKind::Semicolon) {
            return Ok(());
        }
        let bail = self.unexpected("`;`");
        if !self.fatal
            && let Some(last) = self.diagnostics.last_mut()
        {
            *last = last.clone().with_code(ErrorCode::MissingSemicolon);
        }
        Err(bail)
    }

    fn expect_ident(&mut self) -> PResult<String> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn open_block(&mut self) -> PResult<()> {
        self.expect(TokenKind::LBrace, "`{`")
    }

    /// Consume a `}` if present.
    fn close_block(&mut self) -> bool {
        self.eat(TokenKind::RBrace)
    }

    fn reduce(&self, production: &str) {
        if self.trace {
            trace!(pos = self.pos, "reduce {production}");
        }
    }

    // ========== Error Reporting ==========

    /// Record a syntax error at the current token.
    ///
    /// An error at end of input is fatal: there is nothing left to
    /// resynchronize on.
    fn unexpected(&mut self, expected: &str) -> Bail {
        let token = self.current().clone();

        let diagnostic = if token.kind == TokenKind::Eof {
            self.fatal = true;
            Diagnostic::error(
                DiagnosticKind::Parser,
                token.span,
                "syntax error at end of input",
            )
            .with_code(ErrorCode::UnexpectedEof)
        } else {
            Diagnostic::error(
                DiagnosticKind::Parser,
                token.span,
                format!("syntax error at token {} on line {}", token.kind, token.line),
            )
            .with_code(ErrorCode::UnexpectedToken)
        };

        warn!(line = token.line, "{}", diagnostic.message);
        self.diagnostics.push(
            diagnostic
                .with_line(token.line)
                .with_label(Label::new(token.span, format!("expected {expected}"))),
        );
        Bail
    }

    fn duplicate_configurable_frames(&mut self, node: &str, first: Span, second: Span) -> Bail {
        let line = self.current().line;
        self.diagnostics.push(
            Diagnostic::error(
                DiagnosticKind::Parser,
                second,
                format!("node `{node}` declares `configurable_frames` twice (line {line})"),
            )
            .with_code(ErrorCode::DuplicateConfigurableFrames)
            .with_line(line)
            .with_label(Label::new(first, "first declared here"))
            .with_label(Label::new(second, "declared again here")),
        );
        Bail
    }

    // ========== Error Recovery ==========

    /// Discard tokens after a failed object that started at `start`.
    ///
    /// Stops after a `;` or `}` that leaves no block of the object open,
    /// before a section keyword, or at end of input. A top-level attribute
    /// opens no blocks, so for it any `;` or `}` is a boundary. At least one
    /// token is consumed so a failure on the first token cannot loop.
    fn synchronize(&mut self, start: usize) {
        let mut advanced = self.pos > start;
        let nested = !self
            .tokens
            .get(start)
            .is_some_and(|token| matches!(token.kind, TokenKind::Ident(_)));

        while !self.at_end() {
            if advanced && is_sync_token(self.current_kind()) {
                self.braces.clear();
                return;
            }

            let kind = self.current_kind().clone();
            self.advance();
            advanced = true;

            if is_stmt_end(&kind) && (!nested || self.braces.is_balanced()) {
                return;
            }
        }
    }
}
