use anyhow::{Context, Result};
use std::path::Path;

pub mod formatters;

pub use formatters::*;

/// Save rendered content to a file.
pub async fn save_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }

    fs_err::write(path, content)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;

    Ok(())
}

/// Print rendered content to the console.
pub fn print_to_console(content: &str) {
    println!("{}", content);
}
