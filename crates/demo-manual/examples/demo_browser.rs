//! Opens the demo browser.
//!
//! Usage: `demo_browser [options.json]`

fn main() -> demo_manual::Result<()> {
    let browser = match std::env::args_os().nth(1) {
        Some(path) => demo_manual::init_with_options_file(path)?,
        None => demo_manual::init()?,
    };
    demo_manual::show(browser)
}
