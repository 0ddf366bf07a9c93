//! Table of contents panel.

use demo_manual_core::{NodeId, NodeKind, TocTree, TocViewState};
use egui::{Align, RichText, ScrollArea, Ui};

const INDENT: f32 = 14.0;
const TOGGLE_WIDTH: f32 = 18.0;

/// Draws the search box and the visible rows of the table of contents.
///
/// Returns the node the user clicked this frame.
pub fn show_toc(
    ui: &mut Ui,
    tree: &TocTree,
    view: &mut TocViewState,
    selection: Option<NodeId>,
) -> Option<NodeId> {
    ui.horizontal(|ui| {
        ui.label("Search");
        ui.add(egui::TextEdit::singleline(view.filter_mut()).desired_width(120.0));
        if ui.small_button("x").on_hover_text("Clear search").clicked() {
            view.set_filter("");
        }
    });
    ui.horizontal(|ui| {
        if ui.small_button("Expand all").clicked() {
            view.expand_all(tree);
        }
        if ui.small_button("Collapse all").clicked() {
            view.collapse_all();
        }
    });
    ui.separator();

    if tree.is_empty() {
        ui.weak("No demo sections found.");
        return None;
    }

    let scroll_target = view.take_scroll_target();
    let rows = view.visible_rows(tree);
    let mut clicked = None;

    ScrollArea::vertical()
        .id_salt("toc_rows")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in rows {
                let node = tree.node(row.id);
                ui.horizontal(|ui| {
                    ui.add_space(row.depth as f32 * INDENT);
                    if row.has_children {
                        let icon = if row.open { "-" } else { "+" };
                        if ui.small_button(icon).clicked() {
                            view.toggle(row.id);
                        }
                    } else {
                        ui.add_space(TOGGLE_WIDTH);
                    }

                    let mut title = RichText::new(node.title());
                    if row.matched {
                        title = title.strong();
                    }
                    if node.kind() == NodeKind::Duplicate {
                        title = title.italics();
                    }
                    let response = ui
                        .selectable_label(selection == Some(row.id), title)
                        .on_hover_text(format!("{} (line {})", node.path(), node.line_number()));
                    if response.clicked() {
                        clicked = Some(row.id);
                    }
                    if scroll_target == Some(row.id) {
                        response.scroll_to_me(Some(Align::Center));
                    }
                });
            }
        });

    clicked
}
