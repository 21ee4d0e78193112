//! Opens the tank viewer.
//!
//! Drag with the left mouse button to orbit, with the right button (or
//! shift + left) to pan, and scroll to zoom. Pass a JSON options file as the
//! first argument to override the defaults.

fn main() -> tankview::Result<()> {
    match std::env::args().nth(1) {
        Some(path) => tankview::show_with_config_file(path),
        None => tankview::show(),
    }
}
