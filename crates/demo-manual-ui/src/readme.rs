//! Window rendering the project README as markdown.

use egui::Context;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

pub struct ReadmeWindow {
    markdown: String,
    cache: CommonMarkCache,
    pub open: bool,
}

impl ReadmeWindow {
    #[must_use]
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            cache: CommonMarkCache::default(),
            open: false,
        }
    }

    #[must_use]
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn show(&mut self, ctx: &Context) {
        let markdown = &self.markdown;
        let cache = &mut self.cache;
        egui::Window::new("Readme")
            .open(&mut self.open)
            .default_size([560.0, 640.0])
            .vscroll(true)
            .show(ctx, |ui| {
                CommonMarkViewer::new().show(ui, cache, markdown);
            });
    }
}

impl std::fmt::Debug for ReadmeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadmeWindow")
            .field("bytes", &self.markdown.len())
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}
