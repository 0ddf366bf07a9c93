//! The widget demos shown by the browser.
//!
//! This file is also the source the browser indexes and displays, so every
//! section below is tagged with its path in the table of contents.

use demo_manual_core::BrowserOptions;
use egui::{Color32, Context, RichText, ScrollArea, Ui};

use crate::demo_marker;
use crate::markers::DemoMarkers;

/// Source text of the demos, as displayed in the code view.
pub const DEMO_SOURCE: &str = include_str!("demos.rs");

/// Options for browsing [`DEMO_SOURCE`].
#[must_use]
pub fn browser_options() -> BrowserOptions {
    BrowserOptions {
        marker: "demo_marker!".to_string(),
        source_name: "crates/demo-manual-ui/src/demos.rs".to_string(),
        repo_url: "https://github.com/user/demo-manual-rs/blob/main/".to_string(),
        ..BrowserOptions::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fruit {
    Apple,
    Banana,
    Cherry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortColumn {
    Id,
    Name,
    Quantity,
}

#[derive(Debug, Clone)]
struct Item {
    id: u32,
    name: &'static str,
    quantity: u32,
}

/// Values edited by the demo widgets.
#[derive(Debug, Clone)]
pub struct DemoState {
    clicks: u32,
    checked: bool,
    fruit: Fruit,
    combo_index: usize,
    slider_value: f32,
    slider_int: i32,
    drag_value: f64,
    single_line: String,
    multi_line: String,
    columns: usize,
    scroll_rows: usize,
    items: Vec<Item>,
    sort_column: SortColumn,
    sort_ascending: bool,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            clicks: 0,
            checked: true,
            fruit: Fruit::Apple,
            combo_index: 0,
            slider_value: 0.5,
            slider_int: 50,
            drag_value: 1.0,
            single_line: "Hello, world!".to_string(),
            multi_line: "Multi-line text\nwith several\nlines.".to_string(),
            columns: 3,
            scroll_rows: 100,
            items: vec![
                Item { id: 3, name: "Mango", quantity: 12 },
                Item { id: 1, name: "Apple", quantity: 7 },
                Item { id: 4, name: "Kiwi", quantity: 30 },
                Item { id: 2, name: "Banana", quantity: 2 },
            ],
            sort_column: SortColumn::Id,
            sort_ascending: true,
        }
    }
}

/// The window holding all demo sections.
#[derive(Debug)]
pub struct DemoWindow {
    markers: DemoMarkers,
    state: DemoState,
    pub open: bool,
}

impl DemoWindow {
    #[must_use]
    pub fn new(markers: DemoMarkers) -> Self {
        Self {
            markers,
            state: DemoState::default(),
            open: true,
        }
    }

    pub fn markers(&self) -> &DemoMarkers {
        &self.markers
    }

    pub fn show(&mut self, ctx: &Context) {
        self.markers.begin_frame();
        let markers = &self.markers;
        let state = &mut self.state;
        egui::Window::new("Widget Demos")
            .open(&mut self.open)
            .default_pos([16.0, 40.0])
            .default_size([420.0, 600.0])
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| show_demos(markers, ui, state));
            });
    }
}

/// Draws every demo section.
pub fn show_demos(markers: &DemoMarkers, ui: &mut Ui, state: &mut DemoState) {
    ui.label("Hover a section with \"Follow mouse\" enabled, or press its Code button.");
    ui.separator();
    show_widgets(markers, ui, state);
    show_layout(markers, ui, state);
    show_tooltips(markers, ui);
    show_tables(markers, ui, state);
}

fn show_widgets(markers: &DemoMarkers, ui: &mut Ui, state: &mut DemoState) {
    demo_marker!(markers, ui, "Widgets", |ui: &mut Ui| {
        demo_marker!(markers, ui, "Widgets/Basic", |ui: &mut Ui| {
            demo_marker!(markers, ui, "Widgets/Basic/Button", |ui: &mut Ui| {
                ui.horizontal(|ui| {
                    if ui.button("Button").clicked() {
                        state.clicks += 1;
                    }
                    if state.clicks % 2 == 1 {
                        ui.label("Thanks for clicking me!");
                    }
                });
            });

            demo_marker!(markers, ui, "Widgets/Basic/Checkbox", |ui: &mut Ui| {
                ui.checkbox(&mut state.checked, "checkbox");
            });

            demo_marker!(markers, ui, "Widgets/Basic/RadioButton", |ui: &mut Ui| {
                ui.horizontal(|ui| {
                    ui.radio_value(&mut state.fruit, Fruit::Apple, "apple");
                    ui.radio_value(&mut state.fruit, Fruit::Banana, "banana");
                    ui.radio_value(&mut state.fruit, Fruit::Cherry, "cherry");
                });
            });

            demo_marker!(markers, ui, "Widgets/Basic/Combo", |ui: &mut Ui| {
                const ITEMS: [&str; 4] = ["AAAA", "BBBB", "CCCC", "DDDD"];
                egui::ComboBox::from_id_salt("demo_combo")
                    .selected_text(ITEMS[state.combo_index])
                    .show_ui(ui, |ui| {
                        for (index, item) in ITEMS.iter().enumerate() {
                            ui.selectable_value(&mut state.combo_index, index, *item);
                        }
                    });
            });
        });

        demo_marker!(markers, ui, "Widgets/Sliders", |ui: &mut Ui| {
            ui.add(egui::Slider::new(&mut state.slider_value, 0.0..=1.0).text("float"));
            ui.add(egui::Slider::new(&mut state.slider_int, 0..=100).text("int"));
            ui.add(
                egui::DragValue::new(&mut state.drag_value)
                    .speed(0.01)
                    .prefix("drag: "),
            );
        });

        demo_marker!(markers, ui, "Widgets/Text Input", |ui: &mut Ui| {
            ui.text_edit_singleline(&mut state.single_line);
            ui.add(egui::TextEdit::multiline(&mut state.multi_line).desired_rows(3));
            ui.label(format!("{} characters", state.multi_line.chars().count()));
        });

        demo_marker!(markers, ui, "Widgets/Trees", |ui: &mut Ui| {
            for index in 0..3 {
                egui::CollapsingHeader::new(format!("Child {index}"))
                    .id_salt(("demo_tree", index))
                    .show(ui, |ui| {
                        ui.label("blah blah");
                        if ui.small_button("button").clicked() {
                            log::info!("tree child {index} clicked");
                        }
                    });
            }
        });
    });
}

fn show_layout(markers: &DemoMarkers, ui: &mut Ui, state: &mut DemoState) {
    demo_marker!(markers, ui, "Layout", |ui: &mut Ui| {
        demo_marker!(markers, ui, "Layout/Horizontal", |ui: &mut Ui| {
            ui.horizontal(|ui| {
                ui.label("Normal buttons");
                let _ = ui.button("Banana");
                let _ = ui.button("Apple");
                let _ = ui.button("Corniflower");
            });
            ui.horizontal_wrapped(|ui| {
                for index in 0..12 {
                    ui.label(format!("Item {index}"));
                }
            });
        });

        demo_marker!(markers, ui, "Layout/Columns", |ui: &mut Ui| {
            ui.add(egui::Slider::new(&mut state.columns, 1..=5).text("columns"));
            ui.columns(state.columns, |columns| {
                for (index, column) in columns.iter_mut().enumerate() {
                    column.label(format!("Column {index}"));
                    column.label(RichText::new("Some text").weak());
                }
            });
        });

        demo_marker!(markers, ui, "Layout/Scrolling", |ui: &mut Ui| {
            ui.add(egui::Slider::new(&mut state.scroll_rows, 10..=1000).text("rows"));
            let row_height = ui.text_style_height(&egui::TextStyle::Body);
            ScrollArea::vertical()
                .id_salt("demo_scrolling")
                .max_height(120.0)
                .show_rows(ui, row_height, state.scroll_rows, |ui, rows| {
                    for row in rows {
                        ui.label(format!("Row {row}"));
                    }
                });
        });
    });
}

fn show_tooltips(markers: &DemoMarkers, ui: &mut Ui) {
    demo_marker!(markers, ui, "Tooltips", |ui: &mut Ui| {
        ui.label("Hover me").on_hover_text("I am a tooltip");
        ui.label("Hover me too").on_hover_ui(|ui| {
            ui.label(RichText::new("Rich tooltip").color(Color32::LIGHT_BLUE));
            ui.label("with several lines.");
        });
    });
}

fn show_tables(markers: &DemoMarkers, ui: &mut Ui, state: &mut DemoState) {
    demo_marker!(markers, ui, "Tables", |ui: &mut Ui| {
        demo_marker!(markers, ui, "Tables/Sorting", |ui: &mut Ui| {
            ui.label("Click a column header to sort.");
            egui::Grid::new("demo_sorting_table")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui| {
                    for (column, label) in [
                        (SortColumn::Id, "ID"),
                        (SortColumn::Name, "Name"),
                        (SortColumn::Quantity, "Quantity"),
                    ] {
                        let arrow = match (state.sort_column == column, state.sort_ascending) {
                            (true, true) => " ^",
                            (true, false) => " v",
                            (false, _) => "",
                        };
                        if ui.button(format!("{label}{arrow}")).clicked() {
                            state.sort_ascending =
                                state.sort_column != column || !state.sort_ascending;
                            state.sort_column = column;
                        }
                    }
                    ui.end_row();

                    sort_items(&mut state.items, state.sort_column, state.sort_ascending);
                    for item in &state.items {
                        ui.label(item.id.to_string());
                        ui.label(item.name);
                        ui.label(item.quantity.to_string());
                        ui.end_row();
                    }
                });
        });
    });
}

fn sort_items(items: &mut [Item], column: SortColumn, ascending: bool) {
    items.sort_by(|a, b| {
        let ordering = match column {
            SortColumn::Id => a.id.cmp(&b.id),
            SortColumn::Name => a.name.cmp(b.name),
            SortColumn::Quantity => a.quantity.cmp(&b.quantity),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}
