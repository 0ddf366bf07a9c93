//! End-to-end browsing scenarios against the core, with an in-memory editor.

use demo_manual_core::{
    AnnotatedSource, BrowserOptions, CodeEditor, CursorCommand, CursorPosition, DemoBridge,
    DemoEvent, DemoSite, MarkerPattern, ParseWarning, SyncController, TocTree,
};
use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

#[derive(Default)]
struct MemoryEditor {
    text: String,
    cursor: CursorPosition,
    moves: usize,
}

impl CodeEditor for MemoryEditor {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_cursor_position(&mut self, command: CursorCommand) {
        self.cursor = command.position();
        self.moves += 1;
    }

    fn cursor_position(&self) -> CursorPosition {
        self.cursor
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// 60 lines with markers at lines 10, 20 and 50, and optionally an
/// unterminated marker at line 7.
fn demo_source(with_broken_marker: bool) -> String {
    let mut text = String::new();
    for line in 1..=60 {
        match line {
            7 if with_broken_marker => text.push_str("    IMGUI_DEMO_MARKER(\"Widgets/Broken);\n"),
            10 => text.push_str("    IMGUI_DEMO_MARKER(\"Widgets\");\n"),
            20 => text.push_str("    IMGUI_DEMO_MARKER(\"Widgets/Button\");\n"),
            50 => text.push_str("    IMGUI_DEMO_MARKER(\"Layout\");\n"),
            _ => {
                let _ = writeln!(text, "    ImGui::Text(\"line {line}\");");
            }
        }
    }
    text
}

fn parse(text: &str) -> AnnotatedSource {
    let pattern = MarkerPattern::new("IMGUI_DEMO_MARKER").unwrap();
    AnnotatedSource::parse(text, &pattern)
}

fn path_at(tree: &TocTree, line: usize) -> Option<&str> {
    tree.nearest_node(line).map(|id| tree.node(id).path())
}

#[test]
fn test_nearest_node_scenario() {
    let tree = TocTree::from_source(&parse(&demo_source(false)), '/');

    assert_eq!(path_at(&tree, 25), Some("Widgets/Button"));
    assert_eq!(path_at(&tree, 45), Some("Widgets/Button"));
    assert_eq!(path_at(&tree, 5), None);
    assert_eq!(path_at(&tree, 10), Some("Widgets"));
    assert_eq!(path_at(&tree, 50), Some("Layout"));
    assert_eq!(path_at(&tree, 10_000), Some("Layout"));
}

#[test]
fn test_unterminated_marker_is_skipped() {
    let text = demo_source(true);
    let source = parse(&text);

    let tags: Vec<(usize, &str)> = source
        .lines_with_tags()
        .iter()
        .map(|tag| (tag.line_number, tag.tag.as_str()))
        .collect();
    assert_eq!(
        tags,
        vec![(10, "Widgets"), (20, "Widgets/Button"), (50, "Layout")]
    );
    assert_eq!(source.warnings(), &[ParseWarning::UnterminatedTag { line: 7 }]);
    assert_eq!(source.source_code().len(), text.len());
    assert_eq!(source.source_code(), text);
}

#[test]
fn test_follow_off_then_explicit_navigation() {
    let controller = SyncController::from_source_text(
        &demo_source(false),
        MemoryEditor::default(),
        BrowserOptions::default(),
    )
    .unwrap();
    let controller = Rc::new(RefCell::new(controller));
    let mut bridge = DemoBridge::new();
    bridge.register(&controller);

    bridge.emit(DemoEvent::Activate(DemoSite::new("imgui_demo.cpp", 10, "Widgets")));
    controller.borrow_mut().toggle_follow();
    controller.borrow_mut().begin_frame();

    bridge.emit(DemoEvent::Hover(DemoSite::new("imgui_demo.cpp", 20, "Button")));
    {
        let controller = controller.borrow();
        assert!(!controller.is_follow_enabled());
        assert_eq!(controller.selected_node().unwrap().path(), "Widgets");
        assert_eq!(controller.current_line(), 10);
        assert_eq!(controller.editor().moves, 1);
    }

    bridge.emit(DemoEvent::Activate(DemoSite::new("imgui_demo.cpp", 50, "Layout")));
    let controller = controller.borrow();
    assert_eq!(controller.current_line(), 50);
    assert_eq!(controller.selected_node().unwrap().path(), "Layout");
}

#[test]
fn test_follow_mode_tracks_hover_without_moving_cursor() {
    let controller = SyncController::from_source_text(
        &demo_source(false),
        MemoryEditor::default(),
        BrowserOptions::default(),
    )
    .unwrap();
    let controller = Rc::new(RefCell::new(controller));
    let mut bridge = DemoBridge::new();
    bridge.register(&controller);

    for line in [10, 20, 50, 20] {
        controller.borrow_mut().begin_frame();
        bridge.emit(DemoEvent::Hover(DemoSite::new("imgui_demo.cpp", line, "")));
    }

    let controller = controller.borrow();
    assert_eq!(controller.selected_node().unwrap().path(), "Widgets/Button");
    assert_eq!(controller.editor().moves, 0);
    assert_eq!(controller.follow().last_followed_line, Some(20));
}

#[test]
fn test_empty_source_gives_inert_navigation() {
    let mut controller = SyncController::from_source_text(
        "int main() { return 0; }\n",
        MemoryEditor::default(),
        BrowserOptions::default(),
    )
    .unwrap();
    assert!(controller.tree().is_empty());

    demo_manual_core::DemoObserver::on_demo_event(
        &mut controller,
        DemoEvent::Activate(DemoSite::new("imgui_demo.cpp", 1, "Anything")),
    );
    assert_eq!(controller.selection(), None);
    assert_eq!(controller.current_line(), 1);
}

#[test]
fn test_unregistered_bridge_is_silent() {
    let bridge = DemoBridge::new();
    bridge.emit(DemoEvent::Activate(DemoSite::new("imgui_demo.cpp", 10, "Widgets")));
    assert!(!bridge.is_connected());
}

#[test]
fn test_open_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("imgui_demo.cpp");
    std::fs::write(&path, demo_source(false)).unwrap();

    let controller =
        SyncController::open(&path, MemoryEditor::default(), BrowserOptions::default()).unwrap();
    assert_eq!(controller.tree().entry_count(), 3);
    assert_eq!(controller.editor().text(), demo_source(false));
}

#[test]
fn test_open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = SyncController::open(
        dir.path().join("missing.cpp"),
        MemoryEditor::default(),
        BrowserOptions::default(),
    );
    assert!(result.is_err());
}
