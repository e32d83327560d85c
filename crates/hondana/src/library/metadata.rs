use std::path::Path;

use serde::Deserialize;

use super::LibraryError;

pub const INFO_FILE: &str = "info.json";

/// Optional per-manga metadata sitting next to the chapter folders. Every
/// field may be absent, both in the file and as the file itself.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MangaInfo {
    pub author: Option<String>,
    pub genres: Option<Vec<String>>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub last_updated: Option<String>,
}

impl MangaInfo {
    /// Read `info.json` from a manga directory. A missing file yields the
    /// defaults; a file that exists but does not parse is an error the
    /// caller propagates.
    pub fn load(manga_dir: &Path) -> Result<Self, LibraryError> {
        match std::fs::read(manga_dir.join(INFO_FILE)) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn author(&self) -> String {
        self.author.clone().unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn genres(&self) -> Vec<String> {
        self.genres.clone().unwrap_or_default()
    }

    pub fn status(&self) -> String {
        self.status.clone().unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| "No description available.".to_string())
    }

    pub fn rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn last_updated(&self) -> String {
        self.last_updated
            .clone()
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_full_document() {
        let info: MangaInfo = serde_json::from_str(
            r#"{
                "author": "Tom DeFalco",
                "genres": ["Comedy", "Superhero"],
                "status": "Completed",
                "description": "The greatest hero of Ducktropolis.",
                "rating": 8.5,
                "last_updated": "2024-03-01"
            }"#,
        )
        .unwrap();

        assert_eq!(info.author(), "Tom DeFalco");
        assert_eq!(info.genres(), vec!["Comedy", "Superhero"]);
        assert_eq!(info.status(), "Completed");
        assert_eq!(info.description(), "The greatest hero of Ducktropolis.");
        assert_eq!(info.rating(), 8.5);
        assert_eq!(info.last_updated(), "2024-03-01");
    }

    #[test]
    fn test_defaults_for_missing_keys() {
        let info: MangaInfo = serde_json::from_str(r#"{"author": "Someone"}"#).unwrap();

        assert_eq!(info.author(), "Someone");
        assert!(info.genres().is_empty());
        assert_eq!(info.status(), "Unknown");
        assert_eq!(info.description(), "No description available.");
        assert_eq!(info.rating(), 0.0);
        assert_eq!(info.last_updated(), "Unknown");
    }

    #[test]
    fn test_missing_file_is_default() {
        let info = MangaInfo::load(&PathBuf::from("../../test/data/manga/Space Adventures")).unwrap();

        assert_eq!(info, MangaInfo::default());
    }

    #[test]
    fn test_load_from_directory() {
        let info = MangaInfo::load(&PathBuf::from("../../test/data/manga/Super Duck")).unwrap();

        assert_eq!(info.author(), "Tom DeFalco");
        assert_eq!(info.rating(), 8.5);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let result = MangaInfo::load(&PathBuf::from("../../test/data/broken/manga/Torn Pages"));

        assert!(matches!(result, Err(LibraryError::Metadata(_))));
    }
}
