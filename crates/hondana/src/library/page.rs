use std::path::Path;

use fancy_regex::Regex;
use once_cell::sync::Lazy;

use super::{LibraryError, has_image_extension};

static SUFFIX_BEFORE_EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_(\d+)(?=\.[^.]+$)").expect("valid regex"));
static FIRST_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub filename: String,
    pub number: f64,
}

/// Ordinal an image filename sorts by: digits between `_` and the final
/// extension first, then the first digit run anywhere in the name, then
/// everything else after all numbered pages.
pub fn page_number(filename: &str) -> f64 {
    if let Ok(Some(captures)) = SUFFIX_BEFORE_EXTENSION_RE.captures(filename) {
        if let Some(digits) = captures.get(1) {
            return digits.as_str().parse().unwrap_or(f64::INFINITY);
        }
    }

    if let Ok(Some(mat)) = FIRST_DIGITS_RE.find(filename) {
        return mat.as_str().parse().unwrap_or(f64::INFINITY);
    }

    f64::INFINITY
}

/// List the images directly inside a chapter directory, in reading order.
pub fn scan_pages(chapter_dir: &Path) -> Result<Vec<Page>, LibraryError> {
    let mut pages: Vec<Page> = std::fs::read_dir(chapter_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|filename| has_image_extension(filename))
        .map(|filename| {
            let number = page_number(&filename);
            Page { filename, number }
        })
        .collect();

    pages.sort_by(|a, b| a.number.total_cmp(&b.number));

    Ok(pages)
}

/// First HTML file inside a chapter directory, if any. Its raw contents
/// replace the rendered reader entirely.
pub fn find_html_file(chapter_dir: &Path) -> Result<Option<String>, LibraryError> {
    Ok(std::fs::read_dir(chapter_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .find(|filename| filename.to_lowercase().ends_with(".html")))
}
