//! The demo browser: demo window, code window and readme, wired together.

use std::cell::RefCell;
use std::rc::Rc;

use demo_manual_core::{DemoBridge, LinkOpener, SyncController};
use egui::{Context, Ui};

use crate::code_view::CodeView;
use crate::demos::DemoWindow;
use crate::markers::DemoMarkers;
use crate::readme::ReadmeWindow;
use crate::toc_panel::show_toc;

const HELP_TEXT: &str = "Browse the widget demos and their code.\n\n\
    Press \"Code\" on a demo section to jump to its source.\n\
    With \"Follow mouse\" on, the table of contents tracks the section under the mouse.\n\
    Click a table of contents entry or a line to move the cursor.";

/// Opens links through egui's platform output.
pub struct EguiLinkOpener<'a> {
    ctx: &'a Context,
}

impl<'a> EguiLinkOpener<'a> {
    #[must_use]
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }
}

impl LinkOpener for EguiLinkOpener<'_> {
    fn open_url(&mut self, url: &str) {
        self.ctx.open_url(egui::OpenUrl::new_tab(url));
    }
}

/// Shared handle to the controller the demo layer reports to.
pub type SharedController = Rc<RefCell<SyncController<CodeView>>>;

pub struct DemoBrowser {
    controller: SharedController,
    demos: DemoWindow,
    readme: ReadmeWindow,
    show_code: bool,
}

impl DemoBrowser {
    /// Connects the demo window to `controller` and builds the windows.
    pub fn new(mut controller: SyncController<CodeView>, readme_markdown: impl Into<String>) -> Self {
        let marker_lines: Vec<usize> = controller
            .source()
            .lines_with_tags()
            .iter()
            .map(|tagged| tagged.line_number)
            .collect();
        controller.editor_mut().set_marker_lines(marker_lines);

        let controller = Rc::new(RefCell::new(controller));
        let mut bridge = DemoBridge::new();
        bridge.register(&controller);

        Self {
            controller,
            demos: DemoWindow::new(DemoMarkers::new(bridge)),
            readme: ReadmeWindow::new(readme_markdown),
            show_code: true,
        }
    }

    pub fn controller(&self) -> &SharedController {
        &self.controller
    }

    pub fn demo_window(&self) -> &DemoWindow {
        &self.demos
    }

    pub fn readme(&self) -> &ReadmeWindow {
        &self.readme
    }

    #[must_use]
    pub fn is_code_window_open(&self) -> bool {
        self.show_code
    }

    /// Starts a frame of demo event handling.
    ///
    /// Call once per frame, before the first layout pass: an activation then
    /// wins over hovers in every pass of that frame.
    pub fn begin_frame(&self) {
        self.controller.borrow_mut().begin_frame();
    }

    /// Draws one layout pass of the browser.
    pub fn ui(&mut self, ctx: &Context) {
        self.show_menu_bar(ctx);
        self.demos.show(ctx);
        self.show_code_window(ctx);
        self.readme.show(ctx);
    }

    fn show_menu_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("browser_menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("demo-manual");
                ui.separator();
                ui.toggle_value(&mut self.demos.open, "Demos");
                ui.toggle_value(&mut self.show_code, "Code");
                ui.toggle_value(&mut self.readme.open, "Readme");
            });
        });
    }

    fn show_code_window(&mut self, ctx: &Context) {
        let mut controller = self.controller.borrow_mut();
        let focus = controller.take_focus_request();
        if focus {
            self.show_code = true;
        }

        let title = controller.options().window_title.clone();
        let response = egui::Window::new(title)
            .open(&mut self.show_code)
            .default_pos([460.0, 40.0])
            .default_size([760.0, 640.0])
            .show(ctx, |ui| {
                show_toolbar(ui, &mut controller);
                ui.separator();

                egui::SidePanel::left("toc_panel")
                    .resizable(true)
                    .default_width(220.0)
                    .show_inside(ui, |ui| {
                        let selection = controller.selection();
                        let (tree, view) = controller.tree_and_view_mut();
                        if let Some(id) = show_toc(ui, tree, view, selection) {
                            controller.on_toc_select(id);
                        }
                    });

                egui::CentralPanel::default().show_inside(ui, |ui| {
                    if controller.editor_mut().show(ui).is_some() {
                        controller.sync_from_editor();
                    }
                });
            });

        if focus {
            if let Some(response) = response {
                ctx.move_to_top(response.response.layer_id);
            }
        }
    }
}

fn show_toolbar(ui: &mut Ui, controller: &mut SyncController<CodeView>) {
    ui.horizontal(|ui| {
        ui.label("(?)").on_hover_text(HELP_TEXT);

        let mut follow = controller.is_follow_enabled();
        if ui
            .checkbox(&mut follow, "Follow mouse")
            .on_hover_text("Track the demo section under the mouse")
            .changed()
        {
            controller.toggle_follow();
        }
        ui.separator();

        ui.label(format!("Line {}", controller.current_line()));
        if let Some(node) = controller.selected_node() {
            ui.weak(node.path());
        }

        let url = controller.source_url();
        if ui.button("View on GitHub").on_hover_text(url).clicked() {
            controller.open_source_link(&mut EguiLinkOpener::new(ui.ctx()));
        }

        #[cfg(feature = "save-source")]
        show_save_controls(ui, controller);
    });
}

#[cfg(feature = "save-source")]
fn show_save_controls(ui: &mut Ui, controller: &mut SyncController<CodeView>) {
    ui.separator();
    let mut editing = controller.editor().is_editing();
    if ui.toggle_value(&mut editing, "Edit").changed() {
        controller.editor_mut().set_editing(editing);
    }

    let save_path = controller.options().save_path.clone();
    let can_save = save_path.is_some() && controller.editor().is_dirty();
    if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
        if let Some(path) = save_path {
            if let Err(err) = controller.editor_mut().save(&path) {
                log::error!("failed to save {}: {err}", path.display());
            }
        }
    }
}

impl std::fmt::Debug for DemoBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoBrowser")
            .field("controller", &self.controller)
            .field("show_code", &self.show_code)
            .finish_non_exhaustive()
    }
}
