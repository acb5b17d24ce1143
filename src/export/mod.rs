pub mod html;

use crate::error::Result;
use aura_threads_common::Lookbook;
use std::path::Path;

pub fn write_json(lookbook: &Lookbook, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(lookbook)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// 指定された形式だけ書き出す
pub fn export_lookbook(
    lookbook: &Lookbook,
    html_path: Option<&Path>,
    json_path: Option<&Path>,
) -> Result<()> {
    if let Some(path) = html_path {
        html::write_html(lookbook, path)?;
        println!("✔ HTML output: {}", path.display());
    }

    if let Some(path) = json_path {
        write_json(lookbook, path)?;
        println!("✔ JSON output: {}", path.display());
    }

    Ok(())
}
