//! demo-manual: an interactive widget demo browser.
//!
//! The browser shows a window of live egui widget demos next to their source
//! code. Every demo section is tagged in the source with a marker such as
//! `demo_marker!(markers, ui, "Widgets/Basic/Button", |ui| { ... })`; the
//! tags form a table of contents, and the code view follows the demos:
//!
//! - press **Code** on a section to jump to its source
//! - turn on **Follow mouse** to have the table of contents track the section
//!   under the pointer
//! - click a table of contents entry to move the code view there
//!
//! # Quick Start
//!
//! ```no_run
//! fn main() -> demo_manual::Result<()> {
//!     let browser = demo_manual::init()?;
//!     demo_manual::show(browser)
//! }
//! ```
//!
//! The core (`demo-manual-core`) is independent of egui and can index any
//! source that uses a marker call, `imgui_demo.cpp` included; see
//! [`BrowserOptions`].

mod app;

use std::path::Path;

use thiserror::Error;

pub use app::GpuError;

// Re-export core types
pub use demo_manual_core::{
    AnnotatedSource, BrowserError, BrowserOptions, CodeEditor, CursorCommand, CursorPosition,
    DemoBridge, DemoEvent, DemoObserver, DemoSite, FollowState, LineWithTag, LinkOpener,
    MarkerPattern, NodeId, NodeKind, ParseWarning, SyncController, TocNode, TocTree,
    TocViewState,
};

// Re-export UI types
pub use demo_manual_ui::{
    browser_options, demo_marker, CodeView, DemoBrowser, DemoMarkers, DemoWindow, DEMO_SOURCE,
};

/// README shown in the browser's readme window.
pub const README: &str = include_str!("../../../README.md");

/// Errors from setting up or running the browser.
#[derive(Error, Debug)]
pub enum Error {
    /// The demo source or the options could not be loaded.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// The window or GPU could not be brought up.
    #[error(transparent)]
    Gpu(#[from] GpuError),
}

/// A specialized Result type for demo-manual operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Builds the browser over the bundled demos with their default options.
pub fn init() -> Result<DemoBrowser> {
    init_with_options(browser_options())
}

/// Builds the browser over the bundled demos.
pub fn init_with_options(options: BrowserOptions) -> Result<DemoBrowser> {
    let _ = env_logger::try_init();
    let controller = SyncController::from_source_text(DEMO_SOURCE, CodeView::new(), options)?;
    for warning in controller.indexing_warnings() {
        log::warn!("demo source: {warning}");
    }
    log::info!("demo-manual initialized");
    Ok(DemoBrowser::new(controller, README))
}

/// Builds the browser with options read from a JSON file.
///
/// Keys missing from the file, or the whole file when it does not exist, are
/// taken from [`browser_options`].
pub fn init_with_options_file(path: impl AsRef<Path>) -> Result<DemoBrowser> {
    let path = path.as_ref();
    let options = if path.exists() {
        log::info!("loading options from {}", path.display());
        BrowserOptions::load_over(path, &browser_options())?
    } else {
        log::info!("{} not found, using default options", path.display());
        browser_options()
    };
    init_with_options(options)
}

/// Opens the browser window and runs until it is closed.
pub fn show(browser: DemoBrowser) -> Result<()> {
    let _ = env_logger::try_init();
    app::run_app(browser)?;
    Ok(())
}
