//! Output path naming

use std::path::{Path, PathBuf};

/// Build the output path for a translated file by inserting a suffix
/// before the extension: `story.txt` with `(k)` becomes `story(k).txt`.
pub fn output_path_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    match path.extension().and_then(|e| e.to_str()) {
        Some(extension) if !stem.is_empty() => {
            path.with_file_name(format!("{}{}.{}", stem, suffix, extension))
        }
        _ => {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            path.with_file_name(format!("{}{}", name, suffix))
        }
    }
}
