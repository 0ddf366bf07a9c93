//! Read-only code view with line numbers, driven through [`CodeEditor`].

use demo_manual_core::{CodeEditor, CursorCommand, CursorPosition};
use egui::{Color32, RichText, ScrollArea, Sense, TextStyle, Ui};

const CURSOR_LINE_COLOR: Color32 = Color32::from_rgb(60, 60, 90);
const MARKER_LINE_COLOR: Color32 = Color32::from_rgb(230, 200, 90);

/// Vertical offset that puts `line` `context_lines` rows below the top.
#[must_use]
pub fn scroll_offset_for_line(line: usize, context_lines: usize, row_height_with_spacing: f32) -> f32 {
    let first_visible_row = line.saturating_sub(1).saturating_sub(context_lines);
    first_visible_row as f32 * row_height_with_spacing
}

/// Displays source text one numbered row per line.
#[derive(Debug, Default)]
pub struct CodeView {
    text: String,
    lines: Vec<String>,
    /// Sorted lines to highlight as section markers.
    marker_lines: Vec<usize>,
    cursor: CursorPosition,
    pending_scroll: Option<CursorCommand>,
    #[cfg(feature = "save-source")]
    editing: bool,
    #[cfg(feature = "save-source")]
    dirty: bool,
}

impl CodeView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: CursorPosition::new(1, 0),
            ..Self::default()
        }
    }

    /// Sets the lines drawn as section markers.
    pub fn set_marker_lines(&mut self, lines: impl IntoIterator<Item = usize>) {
        self.marker_lines = lines.into_iter().collect();
        self.marker_lines.sort_unstable();
        self.marker_lines.dedup();
    }

    #[must_use]
    pub fn is_marker_line(&self, line: usize) -> bool {
        self.marker_lines.binary_search(&line).is_ok()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the scroll request not yet applied by [`Self::show`].
    #[must_use]
    pub fn pending_scroll(&self) -> Option<CursorCommand> {
        self.pending_scroll
    }

    fn clamp_line(&self, line: usize) -> usize {
        line.clamp(1, self.lines.len().max(1))
    }

    /// Draws the view. Returns the line the user clicked, if any.
    pub fn show(&mut self, ui: &mut Ui) -> Option<usize> {
        #[cfg(feature = "save-source")]
        if self.editing {
            self.show_editor(ui);
            return None;
        }

        let row_height = ui.text_style_height(&TextStyle::Monospace);
        let row_height_with_spacing = row_height + ui.spacing().item_spacing.y;

        let mut area = ScrollArea::both()
            .id_salt("code_view")
            .auto_shrink([false, false]);
        if let Some(command) = self.pending_scroll.take() {
            area = area.vertical_scroll_offset(scroll_offset_for_line(
                command.line,
                command.viewport_line_offset,
                row_height_with_spacing,
            ));
        }

        let mut clicked = None;
        area.show_rows(ui, row_height, self.lines.len(), |ui, rows| {
            for index in rows {
                let line = index + 1;
                let mut text = RichText::new(format!("{line:>5}  {}", self.lines[index])).monospace();
                if self.is_marker_line(line) {
                    text = text.color(MARKER_LINE_COLOR);
                }
                if line == self.cursor.line {
                    text = text.background_color(CURSOR_LINE_COLOR);
                }
                let response = ui.add(egui::Label::new(text).sense(Sense::click()).extend());
                if response.clicked() {
                    clicked = Some(line);
                }
            }
        });

        if let Some(line) = clicked {
            self.cursor = CursorPosition::new(line, 0);
        }
        clicked
    }
}

#[cfg(feature = "save-source")]
impl CodeView {
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Returns whether the text was edited since it was last set or saved.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the current text to `path`.
    pub fn save(&mut self, path: &std::path::Path) -> std::io::Result<()> {
        std::fs::write(path, &self.text)?;
        self.dirty = false;
        log::info!("saved {} lines to {}", self.lines.len(), path.display());
        Ok(())
    }

    fn show_editor(&mut self, ui: &mut Ui) {
        ScrollArea::both()
            .id_salt("code_view_editor")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let response = ui.add(
                    egui::TextEdit::multiline(&mut self.text)
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    self.lines = self.text.lines().map(str::to_string).collect();
                    self.dirty = true;
                }
            });
    }
}

impl CodeEditor for CodeView {
    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.lines = text.lines().map(str::to_string).collect();
        self.cursor = CursorPosition::new(self.clamp_line(self.cursor.line), 0);
        #[cfg(feature = "save-source")]
        {
            self.dirty = false;
        }
    }

    fn set_cursor_position(&mut self, command: CursorCommand) {
        let line = self.clamp_line(command.line);
        self.cursor = CursorPosition::new(line, command.column);
        self.pending_scroll = Some(CursorCommand { line, ..command });
    }

    fn cursor_position(&self) -> CursorPosition {
        self.cursor
    }

    fn text(&self) -> &str {
        &self.text
    }
}
