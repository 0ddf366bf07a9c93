//! Demo sections that report themselves to the browser.
//!
//! Every section of the demo window is drawn through [`DemoMarkers::section`],
//! usually via the [`demo_marker!`](crate::demo_marker) macro which fills in
//! the call site. A section emits
//! - [`DemoEvent::Hover`] while the pointer is over it (innermost section only),
//! - [`DemoEvent::Activate`] when its "Code" button is clicked.

use std::cell::Cell;

use demo_manual_core::{DemoBridge, DemoEvent, DemoSite};
use egui::collapsing_header::CollapsingState;
use egui::Ui;

/// Draws a demo section tagged with its source location.
///
/// The tag literal must stay on the same line as the macro name: the browser
/// finds sections by scanning the source for this macro.
#[macro_export]
macro_rules! demo_marker {
    ($markers:expr, $ui:expr, $tag:expr, $contents:expr) => {
        $markers.section($ui, $tag, file!(), line!(), $contents)
    };
}

/// Event source shared by all sections of the demo window.
#[derive(Debug, Default)]
pub struct DemoMarkers {
    bridge: DemoBridge,
    hover_claimed: Cell<bool>,
}

impl DemoMarkers {
    #[must_use]
    pub fn new(bridge: DemoBridge) -> Self {
        Self {
            bridge,
            hover_claimed: Cell::new(false),
        }
    }

    pub fn bridge(&self) -> &DemoBridge {
        &self.bridge
    }

    /// Resets per-frame state. Call once before drawing the demo window.
    pub fn begin_frame(&self) {
        self.hover_claimed.set(false);
    }

    /// Draws a collapsible section titled with the last segment of `tag`.
    ///
    /// Returns what `add_contents` returned, or `None` while collapsed.
    pub fn section<R>(
        &self,
        ui: &mut Ui,
        tag: &str,
        file: &str,
        line: u32,
        add_contents: impl FnOnce(&mut Ui) -> R,
    ) -> Option<R> {
        let site = DemoSite::new(file, line as usize, tag);
        let id = ui.make_persistent_id(tag);

        let (toggle, header, body) = CollapsingState::load_with_default_open(ui.ctx(), id, false)
            .show_header(ui, |ui| {
                ui.label(section_title(tag));
                ui.small_button("Code")
                    .on_hover_text("Show the code of this demo")
                    .clicked()
            })
            .body(add_contents);

        if header.inner {
            self.bridge.emit(DemoEvent::Activate(site));
        }

        let mut rect = toggle.rect.union(header.response.rect);
        if let Some(body) = &body {
            rect = rect.union(body.response.rect);
        }
        // Nested sections finish drawing first, so the innermost claims the hover.
        if !self.hover_claimed.get() && ui.rect_contains_pointer(rect) {
            self.hover_claimed.set(true);
            self.bridge.emit(DemoEvent::Hover(site));
        }

        body.map(|body| body.inner)
    }
}

/// Returns the last path segment of a tag.
#[must_use]
pub fn section_title(tag: &str) -> &str {
    tag.rsplit('/')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use demo_manual_core::DemoObserver;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(usize, bool)>,
    }

    impl DemoObserver for Recorder {
        fn on_demo_event(&mut self, event: DemoEvent<'_>) {
            self.events.push((event.line(), event.is_hover()));
        }
    }

    fn markers_with_recorder() -> (DemoMarkers, Rc<RefCell<Recorder>>) {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut bridge = DemoBridge::new();
        bridge.register(&recorder);
        (DemoMarkers::new(bridge), recorder)
    }

    fn draw(ctx: &egui::Context, input: egui::RawInput, markers: &DemoMarkers) {
        let _ = ctx.run(input, |ctx| {
            markers.begin_frame();
            egui::Area::new(egui::Id::new("demo_area"))
                .fixed_pos(egui::pos2(0.0, 0.0))
                .show(ctx, |ui| {
                    markers.section(ui, "Widgets", "demos.rs", 12, |ui| ui.label("body"));
                });
        });
    }

    #[test]
    fn test_section_title() {
        assert_eq!(section_title("Widgets/Basic/Button"), "Button");
        assert_eq!(section_title("Layout"), "Layout");
        assert_eq!(section_title("Layout/"), "Layout");
    }

    #[test]
    fn test_no_events_without_pointer() {
        let ctx = egui::Context::default();
        let (markers, recorder) = markers_with_recorder();
        draw(&ctx, egui::RawInput::default(), &markers);
        draw(&ctx, egui::RawInput::default(), &markers);
        assert!(recorder.borrow().events.is_empty());
    }

    #[test]
    fn test_hover_reports_marker_line() {
        let ctx = egui::Context::default();
        let (markers, recorder) = markers_with_recorder();
        draw(&ctx, egui::RawInput::default(), &markers);

        let input = egui::RawInput {
            events: vec![egui::Event::PointerMoved(egui::pos2(6.0, 6.0))],
            ..Default::default()
        };
        draw(&ctx, input, &markers);

        let events = &recorder.borrow().events;
        assert!(!events.is_empty());
        assert!(events.iter().all(|&(line, hover)| line == 12 && hover));
    }

    #[test]
    fn test_unconnected_markers_draw_silently() {
        let ctx = egui::Context::default();
        let markers = DemoMarkers::default();
        draw(&ctx, egui::RawInput::default(), &markers);
        assert!(!markers.bridge().is_connected());
    }
}
