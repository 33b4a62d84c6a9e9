//! Indentation-aware line writer.

const INDENT: &str = "    ";

/// Accumulates source lines at a tracked brace depth.
pub(crate) struct SourceWriter {
    buf: String,
    depth: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self {
            buf: String::new(),
            depth: 0,
        }
    }

    /// Writes one line at the current depth.
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Writes an empty line without trailing whitespace.
    pub(crate) fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `{` and indents.
    pub(crate) fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    /// Dedents and writes `}`.
    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}
