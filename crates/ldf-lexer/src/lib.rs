//! Lexical analysis for LIN Description Files.
//! LIN 描述文件（LDF）词法分析模块。
//!
//! This crate provides the lexer that converts LDF text into tokens.
//! Whitespace and comments are dropped; newlines only advance the line
//! counter carried by each token.
//! 本 crate 提供词法分析器，将 LDF 文本转换为 token 序列。

mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
