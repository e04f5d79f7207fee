use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;

const CONFIG_TEMPLATE: &str = r##"# pantry configuration
# Every key is optional; the values below are the defaults.

[mealdb]
# Seeds an empty recipe list and serves `pantry show` for seeded recipes
base_url = "https://www.themealdb.com/api/json/v1/1"
seed_keyword = "chicken"

[ai]
base_url = "https://generativelanguage.googleapis.com/v1"
model = "gemini-1.5-flash"
# The key itself is never stored here, only the variable that holds it
api_key_env = "GEMINI_API_KEY"
image_url_template = "https://source.unsplash.com/400x300/?{ingredient},indian-food"

[http]
# Give up on a request after this many seconds (default: wait indefinitely)
# timeout_secs = 30

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui.colors]
# background = "#0C001B"
# text = "#A09BFE"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#5A5580"
# red = "#FF4444"
# yellow = "#FFD700"
# green = "#44FF88"
# cyan = "#44DDFF"
"##;

pub fn cmd_init(args: InitArgs, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if config_path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )
        .into());
    }

    if let Some(parent) = config_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(config_path, CONFIG_TEMPLATE)?;

    println!("Wrote {}", config_path.display());
    Ok(())
}
