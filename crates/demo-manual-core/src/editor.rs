//! Interfaces of the code editor and link collaborators.

/// A cursor position reported by the editor. Lines are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Command moving the editor cursor.
///
/// `viewport_line_offset` is the number of rows the editor keeps visible above
/// the target line, so the line does not land at the very top of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorCommand {
    pub line: usize,
    pub column: usize,
    pub viewport_line_offset: usize,
}

impl CursorCommand {
    /// Targets column 0 of `line`.
    pub fn to_line(line: usize, viewport_line_offset: usize) -> Self {
        Self {
            line,
            column: 0,
            viewport_line_offset,
        }
    }

    /// Returns the position the command moves the cursor to.
    #[must_use]
    pub fn position(&self) -> CursorPosition {
        CursorPosition::new(self.line, self.column)
    }
}

/// The code view the browser drives.
pub trait CodeEditor {
    /// Replaces the whole text.
    fn set_text(&mut self, text: &str);

    /// Moves the cursor and scrolls so the target line is visible.
    fn set_cursor_position(&mut self, command: CursorCommand);

    /// Returns the current cursor position.
    fn cursor_position(&self) -> CursorPosition;

    /// Returns the current text.
    fn text(&self) -> &str;
}

/// Opens URLs outside the application.
pub trait LinkOpener {
    fn open_url(&mut self, url: &str);
}
