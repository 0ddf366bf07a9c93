//! Synchronization between demo events, the table of contents and the editor.
//!
//! The controller owns the parsed source, the TOC tree and view state, and the
//! editor. It reacts to three inputs:
//!
//! - [`DemoEvent::Activate`]: always moves the editor cursor and selects the
//!   section enclosing the line.
//! - [`DemoEvent::Hover`]: in follow mode only, selects and reveals the
//!   enclosing section. The editor cursor never moves on hover.
//! - [`SyncController::on_toc_select`]: moves the editor cursor to the chosen
//!   section.
//!
//! Within one frame an activation wins over every hover, whichever comes
//! first; call [`SyncController::begin_frame`] before the demo layer is drawn.

use std::path::Path;

use crate::editor::{CodeEditor, CursorCommand, LinkOpener};
use crate::error::{ParseWarning, Result};
use crate::event::{DemoEvent, DemoObserver, DemoSite};
use crate::options::BrowserOptions;
use crate::source::{AnnotatedSource, MarkerPattern};
use crate::toc::{NodeId, TocNode, TocTree};
use crate::toc_view::TocViewState;

/// Follow mode state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowState {
    pub enabled: bool,
    /// Line of the last hover that was followed.
    pub last_followed_line: Option<usize>,
}

/// Keeps the demo, the table of contents and the code editor in step.
pub struct SyncController<E: CodeEditor> {
    source: AnnotatedSource,
    tree: TocTree,
    view: TocViewState,
    editor: E,
    options: BrowserOptions,
    follow: FollowState,
    selection: Option<NodeId>,
    activated_this_frame: bool,
    focus_requested: bool,
    last_editor_line: usize,
}

impl<E: CodeEditor> SyncController<E> {
    /// Creates a controller for an already parsed source.
    ///
    /// The editor receives the source text.
    pub fn new(source: AnnotatedSource, mut editor: E, options: BrowserOptions) -> Self {
        let tree = TocTree::from_source(&source, options.path_delimiter);
        editor.set_text(source.source_code());
        let last_editor_line = editor.cursor_position().line;

        log::info!(
            "demo browser ready: {} sections in {}",
            tree.len(),
            options.source_name
        );

        Self {
            source,
            tree,
            view: TocViewState::new(),
            editor,
            follow: FollowState {
                enabled: options.follow_on_start,
                last_followed_line: None,
            },
            options,
            selection: None,
            activated_this_frame: false,
            focus_requested: false,
            last_editor_line,
        }
    }

    /// Parses `source_code` with the marker configured in `options`.
    pub fn from_source_text(source_code: &str, editor: E, options: BrowserOptions) -> Result<Self> {
        options.validate()?;
        let pattern = MarkerPattern::from_options(&options)?;
        let source = AnnotatedSource::parse(source_code, &pattern);
        Ok(Self::new(source, editor, options))
    }

    /// Reads and parses a source file with the marker configured in `options`.
    pub fn open(path: impl AsRef<Path>, editor: E, options: BrowserOptions) -> Result<Self> {
        options.validate()?;
        let pattern = MarkerPattern::from_options(&options)?;
        let source = AnnotatedSource::read(path, &pattern)?;
        Ok(Self::new(source, editor, options))
    }

    #[must_use]
    pub fn source(&self) -> &AnnotatedSource {
        &self.source
    }

    #[must_use]
    pub fn tree(&self) -> &TocTree {
        &self.tree
    }

    /// Returns the warnings of both parsing and tree building, by line.
    #[must_use]
    pub fn indexing_warnings(&self) -> Vec<&ParseWarning> {
        let mut warnings: Vec<&ParseWarning> = self
            .source
            .warnings()
            .iter()
            .chain(self.tree.warnings())
            .collect();
        warnings.sort_by_key(|warning| warning.line());
        warnings
    }

    #[must_use]
    pub fn view(&self) -> &TocViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TocViewState {
        &mut self.view
    }

    /// Returns the tree and the mutable view state together, for drawing.
    pub fn tree_and_view_mut(&mut self) -> (&TocTree, &mut TocViewState) {
        (&self.tree, &mut self.view)
    }

    #[must_use]
    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    #[must_use]
    pub fn options(&self) -> &BrowserOptions {
        &self.options
    }

    #[must_use]
    pub fn follow(&self) -> FollowState {
        self.follow
    }

    #[must_use]
    pub fn is_follow_enabled(&self) -> bool {
        self.follow.enabled
    }

    /// Returns the selected section, `None` meaning the root.
    #[must_use]
    pub fn selection(&self) -> Option<NodeId> {
        self.selection
    }

    #[must_use]
    pub fn selected_node(&self) -> Option<&TocNode> {
        self.selection.and_then(|id| self.tree.get(id))
    }

    /// Starts a new frame of event handling.
    pub fn begin_frame(&mut self) {
        self.activated_this_frame = false;
    }

    /// Flips follow mode and returns the new state.
    pub fn toggle_follow(&mut self) -> bool {
        self.set_follow(!self.follow.enabled);
        self.follow.enabled
    }

    pub fn set_follow(&mut self, enabled: bool) {
        if enabled && !self.follow.enabled {
            self.follow.last_followed_line = None;
        }
        self.follow.enabled = enabled;
        log::debug!("follow mode {}", if enabled { "on" } else { "off" });
    }

    /// Handles a click on a TOC entry: moves the editor to its line.
    pub fn on_toc_select(&mut self, id: NodeId) {
        let Some(node) = self.tree.get(id) else {
            log::debug!("ignoring selection of unknown section {id:?}");
            return;
        };
        let line = node.line_number();
        log::debug!("toc selected '{}' at line {line}", node.path());
        self.move_cursor(line);
        self.selection = Some(id);
    }

    /// Re-selects the section under the editor cursor after the user moved it.
    ///
    /// Returns whether the cursor line changed since the last navigation.
    pub fn sync_from_editor(&mut self) -> bool {
        let line = self.editor.cursor_position().line;
        if line == self.last_editor_line {
            return false;
        }
        self.last_editor_line = line;
        self.selection = self.tree.nearest_node(line);
        true
    }

    /// Returns the editor cursor line.
    #[must_use]
    pub fn current_line(&self) -> usize {
        self.editor.cursor_position().line
    }

    /// Returns the web URL of the source at the editor cursor line.
    #[must_use]
    pub fn source_url(&self) -> String {
        self.options.source_url(self.current_line().max(1))
    }

    pub fn open_source_link(&self, opener: &mut dyn LinkOpener) {
        let url = self.source_url();
        log::info!("opening {url}");
        opener.open_url(&url);
    }

    /// Returns whether the code view should be brought to front, once.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    fn activate(&mut self, site: DemoSite<'_>) {
        log::debug!(
            "show code for '{}' ({}:{})",
            site.title,
            site.file,
            site.line
        );
        self.activated_this_frame = true;
        self.focus_requested = true;
        self.follow.last_followed_line = Some(site.line);
        self.move_cursor(site.line);
        self.select_nearest(site.line);
    }

    fn hover(&mut self, site: DemoSite<'_>) {
        if !self.follow.enabled || self.activated_this_frame {
            return;
        }
        if self.follow.last_followed_line == Some(site.line) {
            return;
        }
        log::trace!("following '{}' at line {}", site.title, site.line);
        self.follow.last_followed_line = Some(site.line);
        self.select_nearest(site.line);
    }

    fn move_cursor(&mut self, line: usize) {
        self.editor
            .set_cursor_position(CursorCommand::to_line(line, self.options.cursor_context_lines));
        self.last_editor_line = self.editor.cursor_position().line;
    }

    fn select_nearest(&mut self, line: usize) {
        self.selection = self.tree.nearest_node(line);
        match self.selection {
            Some(id) => self.view.reveal(&self.tree, id),
            None => log::debug!("no section encloses line {line}, selecting root"),
        }
    }
}

impl<E: CodeEditor> DemoObserver for SyncController<E> {
    fn on_demo_event(&mut self, event: DemoEvent<'_>) {
        match event {
            DemoEvent::Activate(site) => self.activate(site),
            DemoEvent::Hover(site) => self.hover(site),
        }
    }
}

impl<E: CodeEditor> std::fmt::Debug for SyncController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncController")
            .field("sections", &self.tree.len())
            .field("follow", &self.follow)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
