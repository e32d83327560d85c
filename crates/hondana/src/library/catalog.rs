use std::path::Path;

use serde::Serialize;

use super::{LibraryError, MangaInfo, Shelf, has_image_extension};

/// One catalog entry, the directory name doubling as the title. This is
/// also the record shape the search API serializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manga {
    pub title: String,
    pub preview: String,
    pub author: String,
    pub genres: Vec<String>,
    pub status: String,
    pub description: String,
    pub rating: f64,
    pub last_updated: String,
}

/// First file whose name starts with "preview" and carries an image
/// extension, both case-insensitive. Enumeration order decides ties.
pub fn find_preview(manga_dir: &Path) -> Result<Option<String>, LibraryError> {
    Ok(std::fs::read_dir(manga_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .find(|filename| {
            filename.to_lowercase().starts_with("preview") && has_image_extension(filename)
        }))
}

/// Enumerate a shelf directory into a title-sorted catalog. Directories
/// without a preview image are skipped; a malformed `info.json` fails the
/// whole scan.
pub fn scan_manga_list(shelf_dir: &Path, shelf: Shelf) -> Result<Vec<Manga>, LibraryError> {
    let mut manga_list = vec![];

    for entry in std::fs::read_dir(shelf_dir)?.filter_map(Result::ok) {
        if !entry.path().is_dir() {
            continue;
        }

        let title = entry.file_name().to_string_lossy().to_string();
        let Some(preview) = find_preview(&entry.path())? else {
            continue;
        };
        let info = MangaInfo::load(&entry.path())?;

        manga_list.push(Manga {
            preview: format!("/image/{shelf}/{title}/{preview}"),
            title,
            author: info.author(),
            genres: info.genres(),
            status: info.status(),
            description: info.description(),
            rating: info.rating(),
            last_updated: info.last_updated(),
        });
    }

    manga_list.sort_by(|a, b| a.title.cmp(&b.title));

    Ok(manga_list)
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_find_preview() {
        let preview =
            find_preview(&PathBuf::from("../../test/data/manga/Space Adventures")).unwrap();
        assert_eq!(preview.as_deref(), Some("preview.jpg"));

        let none = find_preview(&PathBuf::from("../../test/data/manga/Drafts Only")).unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_scan_is_title_sorted_and_skips_previewless() {
        let manga_list =
            scan_manga_list(&PathBuf::from("../../test/data/manga"), Shelf::Manga).unwrap();

        let titles: Vec<&str> = manga_list.iter().map(|m| m.title.as_str()).collect();
        // "Drafts Only" has no preview image and is not part of the catalog
        assert_eq!(titles, vec!["Space Adventures", "Super Duck"]);
    }

    #[test]
    fn test_scan_merges_metadata_and_defaults() {
        let manga_list =
            scan_manga_list(&PathBuf::from("../../test/data/manga"), Shelf::Manga).unwrap();

        let space = &manga_list[0];
        assert_eq!(
            space.preview,
            "/image/manga/Space Adventures/preview.jpg"
        );
        assert_eq!(space.author, "Unknown");
        assert!(space.genres.is_empty());
        assert_eq!(space.rating, 0.0);
        assert_eq!(space.last_updated, "Unknown");

        let duck = &manga_list[1];
        assert_eq!(duck.author, "Tom DeFalco");
        assert_eq!(duck.genres, vec!["Comedy", "Superhero"]);
        assert_eq!(duck.status, "Completed");
        assert_eq!(duck.rating, 8.5);
        assert_eq!(duck.last_updated, "2024-03-01");
    }

    #[test]
    fn test_scan_propagates_malformed_metadata() {
        let result = scan_manga_list(&PathBuf::from("../../test/data/broken/manga"), Shelf::Manga);

        assert!(matches!(result, Err(LibraryError::Metadata(_))));
    }

    #[test]
    fn test_scan_missing_shelf_fails() {
        let result = scan_manga_list(&PathBuf::from("../../test/data/missing"), Shelf::Manga);

        assert!(matches!(result, Err(LibraryError::Io(_))));
    }
}
