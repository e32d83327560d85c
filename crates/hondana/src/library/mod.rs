pub mod catalog;
pub mod chapter;
pub mod metadata;
pub mod page;

pub use catalog::Manga;
pub use chapter::Chapter;
pub use metadata::MangaInfo;
pub use page::Page;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use thiserror::Error;

use crate::cache::TimedCache;

pub const ITEMS_PER_PAGE: usize = 24;

// extensions considered part of a chapter, anything else is skipped
pub static IMAGE_EXTENSIONS: phf::Set<&'static str> = phf::phf_set! {
    "png",
    "jpg",
    "jpeg",
    "gif",
    "webp",
};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// The two content roots. Anything else a client sends is coerced to
/// [`Shelf::Manga`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shelf {
    Manga,
    Hentai,
}

impl Shelf {
    pub fn from_param(param: &str) -> Self {
        match param {
            "hentai" => Self::Hentai,
            _ => Self::Manga,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manga => "manga",
            Self::Hentai => "hentai",
        }
    }
}

impl std::fmt::Display for Shelf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read side of the content tree. Scan results are memoized per argument
/// tuple for `cache_ttl`; a change on disk stays invisible until the window
/// expires.
pub struct Library {
    path: PathBuf,
    manga_cache: TimedCache<Shelf, Vec<Manga>>,
    chapter_cache: TimedCache<(String, Shelf), Vec<Chapter>>,
    page_cache: TimedCache<(String, String, Shelf), Vec<Page>>,
}

impl Library {
    pub fn new<P: AsRef<Path>>(path: P, cache_ttl: Duration) -> Self {
        Self {
            path: PathBuf::new().join(path),
            manga_cache: TimedCache::new(cache_ttl),
            chapter_cache: TimedCache::new(cache_ttl),
            page_cache: TimedCache::new(cache_ttl),
        }
    }

    /// Base directory the `/image/` route resolves against.
    pub fn root(&self) -> &Path {
        &self.path
    }

    pub fn shelf_dir(&self, shelf: Shelf) -> PathBuf {
        self.path.join(shelf.as_str())
    }

    pub fn manga_dir(&self, shelf: Shelf, title: &str) -> PathBuf {
        self.shelf_dir(shelf).join(title)
    }

    pub fn manga_list(&self, shelf: Shelf) -> Result<Arc<Vec<Manga>>, LibraryError> {
        self.manga_cache.get_or_try_insert_with(shelf, || {
            debug!("scanning {shelf} catalog");
            catalog::scan_manga_list(&self.shelf_dir(shelf), shelf)
        })
    }

    pub fn chapters(&self, title: &str, shelf: Shelf) -> Result<Arc<Vec<Chapter>>, LibraryError> {
        self.chapter_cache
            .get_or_try_insert_with((title.to_string(), shelf), || {
                debug!("scanning chapters of {shelf}/{title}");
                chapter::scan_chapters(&self.manga_dir(shelf, title))
            })
    }

    pub fn pages(
        &self,
        title: &str,
        folder: &str,
        shelf: Shelf,
    ) -> Result<Arc<Vec<Page>>, LibraryError> {
        self.page_cache
            .get_or_try_insert_with((title.to_string(), folder.to_string(), shelf), || {
                debug!("scanning pages of {shelf}/{title}/{folder}");
                page::scan_pages(&self.chapter_dir(shelf, title, folder))
            })
    }

    /// Empty `folder` means the manga directory itself, the oneshot case.
    pub fn chapter_dir(&self, shelf: Shelf, title: &str, folder: &str) -> PathBuf {
        let manga_dir = self.manga_dir(shelf, title);
        if folder.is_empty() {
            manga_dir
        } else {
            manga_dir.join(folder)
        }
    }
}

pub(crate) fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| IMAGE_EXTENSIONS.contains(ext.to_string_lossy().to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shelf_from_param() {
        assert_eq!(Shelf::from_param("manga"), Shelf::Manga);
        assert_eq!(Shelf::from_param("hentai"), Shelf::Hentai);
        assert_eq!(Shelf::from_param("foo"), Shelf::Manga);
        assert_eq!(Shelf::from_param(""), Shelf::Manga);
    }

    #[test]
    fn test_has_image_extension() {
        assert!(has_image_extension("page_1.jpg"));
        assert!(has_image_extension("page_1.JPG"));
        assert!(has_image_extension("cover.webp"));
        assert!(!has_image_extension("notes.txt"));
        assert!(!has_image_extension("reader.html"));
        assert!(!has_image_extension("no_extension"));
    }

    #[test]
    fn test_cached_scan_skips_disk() {
        let library = Library::new("../../test/data", Duration::from_secs(300));

        let first = library.manga_list(Shelf::Manga).unwrap();
        let second = library.manga_list(Shelf::Manga).unwrap();

        // same Arc back means the second call never rescanned the directory
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_chapter_dir_resolution() {
        let library = Library::new("/library", Duration::from_secs(300));

        assert_eq!(
            library.chapter_dir(Shelf::Manga, "Super Duck", "3"),
            PathBuf::from("/library/manga/Super Duck/3")
        );
        assert_eq!(
            library.chapter_dir(Shelf::Manga, "Super Duck", ""),
            PathBuf::from("/library/manga/Super Duck")
        );
    }
}
