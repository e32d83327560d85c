use std::{ops::Range, sync::Arc};

use axum::{Json, extract::Extension, extract::Query, http::StatusCode};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use itertools::Itertools;
use maud::Markup;
use serde::Deserialize;

use super::{internal_error, theme::current_theme};
use crate::{
    library::{Chapter, ITEMS_PER_PAGE, Library, Manga, Shelf},
    presentation::views,
};

#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    mode: Option<String>,
    page: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    mode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Title,
    Rating,
    LastUpdated,
}

impl SortBy {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("rating") => Self::Rating,
            Some("last_updated") => Self::LastUpdated,
            _ => Self::Title,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Rating => "rating",
            Self::LastUpdated => "last_updated",
        }
    }
}

/// `page` is clamped to 1 and anything unparseable falls back to 1.
pub(crate) fn parse_page(param: Option<&str>) -> usize {
    param
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

pub(crate) fn filter_manga(manga_list: &[Manga], search: &str, genre: &str) -> Vec<Manga> {
    let search = search.to_lowercase();

    manga_list
        .iter()
        .filter(|manga| search.is_empty() || manga.title.to_lowercase().contains(&search))
        .filter(|manga| genre.is_empty() || manga.genres.iter().any(|g| g == genre))
        .cloned()
        .collect()
}

fn last_updated_key(value: &str) -> NaiveDate {
    // "Unknown" and anything else unparseable sorts as earliest
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}

/// Title order is the scanner's output order; the other modes sort
/// descending, stable on ties.
pub(crate) fn sort_manga(manga_list: &mut [Manga], sort: SortBy) {
    match sort {
        SortBy::Title => {}
        SortBy::Rating => manga_list.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortBy::LastUpdated => manga_list.sort_by(|a, b| {
            last_updated_key(&b.last_updated).cmp(&last_updated_key(&a.last_updated))
        }),
    }
}

pub(crate) fn all_genres(manga_list: &[Manga]) -> Vec<String> {
    manga_list
        .iter()
        .flat_map(|manga| manga.genres.iter().cloned())
        .unique()
        .sorted()
        .collect()
}

/// Slice bounds for one catalog page plus the page count.
pub(crate) fn page_bounds(total: usize, page: usize) -> (Range<usize>, usize) {
    let total_pages = total.div_ceil(ITEMS_PER_PAGE);
    let start = (page - 1).saturating_mul(ITEMS_PER_PAGE).min(total);
    let end = (start + ITEMS_PER_PAGE).min(total);

    (start..end, total_pages)
}

pub async fn index(
    Query(params): Query<CatalogParams>,
    jar: CookieJar,
    Extension(library): Extension<Arc<Library>>,
) -> Result<Markup, StatusCode> {
    let shelf = Shelf::from_param(params.mode.as_deref().unwrap_or_default());
    let page = parse_page(params.page.as_deref());
    let search = params.search.unwrap_or_default();
    let genre = params.genre.unwrap_or_default();
    let sort = SortBy::from_param(params.sort.as_deref());

    let manga_list = library.manga_list(shelf).map_err(internal_error)?;
    let mut filtered = filter_manga(&manga_list, &search, &genre);
    sort_manga(&mut filtered, sort);

    let genres = all_genres(&filtered);
    let (range, total_pages) = page_bounds(filtered.len(), page);

    let mut entries: Vec<(Manga, Vec<Chapter>)> = vec![];
    for manga in &filtered[range] {
        let chapters = library.chapters(&manga.title, shelf).map_err(internal_error)?;
        // the three most recently added, newest first
        let latest = chapters.iter().rev().take(3).cloned().collect();
        entries.push((manga.clone(), latest));
    }

    Ok(views::catalog(&views::CatalogPage {
        theme: current_theme(&jar),
        shelf,
        entries: &entries,
        page,
        total_pages,
        search: &search,
        sort,
        genre: &genre,
        genres: &genres,
    }))
}

pub async fn api_search(
    Query(params): Query<SearchParams>,
    Extension(library): Extension<Arc<Library>>,
) -> Result<Json<Vec<Manga>>, StatusCode> {
    let shelf = Shelf::from_param(params.mode.as_deref().unwrap_or_default());
    let query = params.q.unwrap_or_default().to_lowercase();

    let manga_list = library.manga_list(shelf).map_err(internal_error)?;
    let results = manga_list
        .iter()
        .filter(|manga| manga.title.to_lowercase().contains(&query))
        .cloned()
        .collect();

    Ok(Json(results))
}

#[cfg(test)]
mod test {
    use super::*;

    fn manga(title: &str, genres: &[&str], rating: f64, last_updated: &str) -> Manga {
        Manga {
            title: title.to_string(),
            preview: format!("/image/manga/{title}/preview.jpg"),
            author: "Unknown".to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            status: "Unknown".to_string(),
            description: "No description available.".to_string(),
            rating,
            last_updated: last_updated.to_string(),
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let list = vec![
            manga("OnePiece", &[], 0.0, "Unknown"),
            manga("Berserk", &[], 0.0, "Unknown"),
        ];

        let hits = filter_manga(&list, "one", "");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "OnePiece");
    }

    #[test]
    fn test_genre_filter_is_exact_membership() {
        let list = vec![
            manga("A", &["Action", "Drama"], 0.0, "Unknown"),
            manga("B", &["action"], 0.0, "Unknown"),
        ];

        let hits = filter_manga(&list, "", "Action");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "A");
    }

    #[test]
    fn test_sort_by_rating_descending() {
        let mut list = vec![
            manga("A", &[], 3.0, "Unknown"),
            manga("B", &[], 9.0, "Unknown"),
            manga("C", &[], 1.0, "Unknown"),
        ];

        sort_manga(&mut list, SortBy::Rating);

        let ratings: Vec<f64> = list.iter().map(|m| m.rating).collect();
        assert_eq!(ratings, vec![9.0, 3.0, 1.0]);
    }

    #[test]
    fn test_sort_by_last_updated_with_unknown_earliest() {
        let mut list = vec![
            manga("A", &[], 0.0, "Unknown"),
            manga("B", &[], 0.0, "2024-06-01"),
            manga("C", &[], 0.0, "2023-01-15"),
        ];

        sort_manga(&mut list, SortBy::LastUpdated);

        let titles: Vec<&str> = list.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_title_sort_keeps_scanner_order() {
        let mut list = vec![
            manga("A", &[], 1.0, "Unknown"),
            manga("B", &[], 9.0, "Unknown"),
        ];

        sort_manga(&mut list, SortBy::Title);

        assert_eq!(list[0].title, "A");
        assert_eq!(list[1].title, "B");
    }

    #[test]
    fn test_page_bounds() {
        // 50 items at 24 per page
        let (range, total_pages) = page_bounds(50, 1);
        assert_eq!(range, 0..24);
        assert_eq!(total_pages, 3);

        let (range, _) = page_bounds(50, 3);
        assert_eq!(range, 48..50);
        assert_eq!(range.len(), 2);

        let (range, total_pages) = page_bounds(0, 1);
        assert_eq!(range, 0..0);
        assert_eq!(total_pages, 0);

        // past the end is empty, not a panic
        let (range, _) = page_bounds(50, 9);
        assert_eq!(range, 50..50);
    }

    #[test]
    fn test_parse_page_is_lenient() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("7")), 7);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
    }

    #[test]
    fn test_all_genres_unique_sorted() {
        let list = vec![
            manga("A", &["Drama", "Action"], 0.0, "Unknown"),
            manga("B", &["Action", "Comedy"], 0.0, "Unknown"),
        ];

        assert_eq!(all_genres(&list), vec!["Action", "Comedy", "Drama"]);
    }

    #[test]
    fn test_sort_by_from_param() {
        assert_eq!(SortBy::from_param(None), SortBy::Title);
        assert_eq!(SortBy::from_param(Some("rating")), SortBy::Rating);
        assert_eq!(SortBy::from_param(Some("last_updated")), SortBy::LastUpdated);
        assert_eq!(SortBy::from_param(Some("bogus")), SortBy::Title);
    }
}
