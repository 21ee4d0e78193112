//! Renders the tank scene to an image without opening a window.
//!
//! Usage: `cargo run --example render_tank -- [output.png] [width] [height]`

use tankview::{render_to_file, SceneOptions};

fn main() -> tankview::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "tank.png".to_string());
    let width = args.next().and_then(|w| w.parse().ok()).unwrap_or(1280);
    let height = args.next().and_then(|h| h.parse().ok()).unwrap_or(720);

    render_to_file(&path, &SceneOptions::default(), width, height)?;
    println!("wrote {path} ({width}x{height})");
    Ok(())
}
