//! Byte offset to line/column conversion.
//! 字节偏移到行列号的转换。

use crate::BytePos;

/// Start offsets of every line in a source text.
/// 源文本中每一行的起始偏移。
///
/// Lines and columns are 1-based, matching how LDF tools report positions.
/// 行号和列号从 1 开始，与 LDF 工具报告位置的方式一致。
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (pos, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(pos as u32 + 1);
            }
        }
        Self {
            line_starts,
            len: source.len() as u32,
        }
    }

    /// Number of lines in the source (an empty source has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based line containing `pos`. Offsets past the end map to the last line.
    /// 包含 `pos` 的行号（从 1 开始）。
    pub fn line(&self, pos: BytePos) -> u32 {
        let offset = pos.0.min(self.len);
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx as u32 + 1,
            Err(idx) => idx as u32,
        }
    }

    /// 1-based `(line, column)` of `pos`; the column counts bytes.
    /// `pos` 的 `(行, 列)`，列按字节计数。
    pub fn line_col(&self, pos: BytePos) -> (u32, u32) {
        let line = self.line(pos);
        let start = self.line_starts[(line - 1) as usize];
        (line, pos.0.min(self.len) - start + 1)
    }

    /// 1-based byte column of `pos` within its line.
    /// `pos` 在所在行中的列号（从 1 开始，按字节计数）。
    pub fn column(&self, pos: BytePos) -> u32 {
        self.line_col(pos).1
    }
}
