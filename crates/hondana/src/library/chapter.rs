use std::path::Path;

use fancy_regex::Regex;
use once_cell::sync::Lazy;

use super::LibraryError;

static TRAILING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_(\d+)$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Sort ordinal, `f64::INFINITY` for names no rule applies to.
    pub number: f64,
    pub title: String,
    /// Subdirectory name; "" means the manga directory itself (oneshot).
    pub folder: String,
}

impl Chapter {
    fn from_folder(folder: String) -> Self {
        let number = chapter_number(&folder);
        let title = if folder.chars().all(|c| c.is_ascii_digit()) && !folder.is_empty() {
            format!("Chapter {folder}")
        } else {
            folder.clone()
        };

        Self {
            number,
            title,
            folder,
        }
    }

    fn oneshot() -> Self {
        Self {
            number: 0.0,
            title: "Oneshot".to_string(),
            folder: String::new(),
        }
    }
}

/// Ordinal a chapter folder name sorts by: a fully numeric name is that
/// number, a trailing `_<digits>` suffix is that number, everything else
/// sorts after all numbered chapters.
pub fn chapter_number(name: &str) -> f64 {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
        return name.parse().unwrap_or(f64::INFINITY);
    }

    if let Ok(Some(captures)) = TRAILING_NUMBER_RE.captures(name) {
        if let Some(digits) = captures.get(1) {
            return digits.as_str().parse().unwrap_or(f64::INFINITY);
        }
    }

    f64::INFINITY
}

/// List a manga's chapters. A manga without chapter subdirectories is a
/// single synthetic oneshot.
pub fn scan_chapters(manga_dir: &Path) -> Result<Vec<Chapter>, LibraryError> {
    let mut chapters: Vec<Chapter> = std::fs::read_dir(manga_dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| Chapter::from_folder(entry.file_name().to_string_lossy().to_string()))
        .collect();

    if chapters.is_empty() {
        return Ok(vec![Chapter::oneshot()]);
    }

    chapters.sort_by(|a, b| a.number.total_cmp(&b.number));

    Ok(chapters)
}

/// First chapter whose number rendered as text, title, or folder equals the
/// requested path segment.
pub fn resolve<'a>(chapters: &'a [Chapter], segment: &str) -> Option<&'a Chapter> {
    chapters.iter().find(|chapter| {
        chapter.number.to_string() == segment
            || chapter.title == segment
            || chapter.folder == segment
    })
}
