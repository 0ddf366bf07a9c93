//! UI layer for demo-manual-rs using egui.

// egui layout math works in f32
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod browser;
pub mod code_view;
pub mod demos;
pub mod integration;
pub mod markers;
pub mod readme;
pub mod toc_panel;

pub use browser::{DemoBrowser, EguiLinkOpener, SharedController};
pub use code_view::CodeView;
pub use demos::{browser_options, DemoWindow, DEMO_SOURCE};
pub use integration::EguiIntegration;
pub use markers::DemoMarkers;
pub use readme::ReadmeWindow;
pub use toc_panel::show_toc;
