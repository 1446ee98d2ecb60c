use std::sync::OnceLock;

use rust_embed::RustEmbed;
use tracing::error;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css`, or an empty sheet if it was not embedded.
pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

fn load_text(path: &str) -> String {
    let Some(file) = EmbeddedAssets::get(path) else {
        error!(path, "embedded asset missing");
        return String::new();
    };
    match String::from_utf8(file.data.into_owned()) {
        Ok(text) => text,
        Err(err) => {
            error!(path, %err, "embedded asset is not valid UTF-8");
            String::new()
        }
    }
}
