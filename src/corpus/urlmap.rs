//! URL map file: one absolute URL per line, sorted

use crate::HarvestError;
use std::fs;
use std::path::Path;

/// Writes the URL list sorted lexicographically, one URL per line
///
/// Every line, including the last, ends with a newline. Duplicates are
/// collapsed.
pub fn write_url_map(path: &Path, urls: &[String]) -> std::io::Result<usize> {
    let mut sorted: Vec<&str> = urls.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut content = String::with_capacity(sorted.iter().map(|u| u.len() + 1).sum());
    for url in &sorted {
        content.push_str(url);
        content.push('\n');
    }

    fs::write(path, content)?;
    Ok(sorted.len())
}

/// Reads a URL list, skipping blank lines
///
/// A missing file is reported as [`HarvestError::MissingInput`] so the
/// extraction pass can abort before touching its output.
pub fn read_url_map(path: &Path) -> Result<Vec<String>, HarvestError> {
    if !path.exists() {
        return Err(HarvestError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
