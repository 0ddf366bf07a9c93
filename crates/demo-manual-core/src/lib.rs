//! Core of demo-manual-rs.
//!
//! This crate holds everything the interactive demo browser does that does not
//! depend on a GUI toolkit:
//! - [`AnnotatedSource`] parses marker calls such as
//!   `IMGUI_DEMO_MARKER("Widgets/Button")` out of a source file
//! - [`TocTree`] arranges the tags into a table of contents
//! - [`DemoBridge`] carries hover and activation events out of the demo layer
//! - [`SyncController`] keeps the table of contents and a [`CodeEditor`] in
//!   step with those events
//! - [`BrowserOptions`] configures all of the above

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors return Self-derived values which doesn't need must_use
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod editor;
pub mod error;
pub mod event;
pub mod options;
pub mod source;
pub mod sync;
pub mod toc;
pub mod toc_view;

pub use editor::{CodeEditor, CursorCommand, CursorPosition, LinkOpener};
pub use error::{BrowserError, ParseWarning, Result};
pub use event::{DemoBridge, DemoEvent, DemoObserver, DemoSite};
pub use options::BrowserOptions;
pub use source::{AnnotatedSource, LineWithTag, MarkerPattern};
pub use sync::{FollowState, SyncController};
pub use toc::{NodeId, NodeKind, TocNode, TocTree};
pub use toc_view::{TocRow, TocViewState};
