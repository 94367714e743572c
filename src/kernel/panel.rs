//! 输出面板：会话内唯一的文档输出缓冲区
//!
//! 缓冲区在第一次写入时创建，之后复用。写入只能通过 [`PanelEdit`] 进行，
//! guard 释放时缓冲区一定回到只读状态（包括 panic 展开路径）。

pub const PANEL_NAME: &str = "gotodocumentation";

#[derive(Debug)]
pub struct PanelBuffer {
    text: String,
    read_only: bool,
}

impl PanelBuffer {
    fn new() -> Self {
        Self {
            text: String::new(),
            read_only: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn edit(&mut self) -> PanelEdit<'_> {
        self.read_only = false;
        PanelEdit { buffer: self }
    }

    pub fn with_edit<R>(&mut self, f: impl FnOnce(&mut PanelEdit<'_>) -> R) -> R {
        let mut edit = self.edit();
        f(&mut edit)
    }
}

/// Writable window over a [`PanelBuffer`].
pub struct PanelEdit<'a> {
    buffer: &'a mut PanelBuffer,
}

impl PanelEdit<'_> {
    pub fn clear(&mut self) {
        self.buffer.text.clear();
    }

    /// `at` is clamped to the buffer length and moved back to a char boundary.
    pub fn insert(&mut self, at: usize, text: &str) {
        let text_buf = &mut self.buffer.text;
        let mut at = at.min(text_buf.len());
        while !text_buf.is_char_boundary(at) {
            at -= 1;
        }
        text_buf.insert_str(at, text);
    }

    pub fn text(&self) -> &str {
        &self.buffer.text
    }
}

impl Drop for PanelEdit<'_> {
    fn drop(&mut self) {
        self.buffer.read_only = true;
    }
}

#[derive(Debug, Default)]
pub struct OutputPanel {
    buffer: Option<PanelBuffer>,
    writes: u64,
}

impl OutputPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &'static str {
        PANEL_NAME
    }

    pub fn is_created(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn buffer(&self) -> Option<&PanelBuffer> {
        self.buffer.as_ref()
    }

    pub fn text(&self) -> &str {
        self.buffer.as_ref().map(PanelBuffer::text).unwrap_or("")
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// writable -> clear -> insert -> read-only
    pub fn replace(&mut self, text: &str) {
        let buffer = self.buffer.get_or_insert_with(PanelBuffer::new);
        buffer.with_edit(|edit| {
            edit.clear();
            edit.insert(0, text);
        });
        self.writes += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/panel.rs"]
mod tests;
