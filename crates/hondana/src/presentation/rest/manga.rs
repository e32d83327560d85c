use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::{
    catalog::{page_bounds, parse_page},
    internal_error,
    theme::current_theme,
};
use crate::{
    library::{Library, MangaInfo, Shelf, catalog, chapter, page},
    presentation::views,
};

#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    page: Option<String>,
}

pub async fn manga_detail(
    Path((shelf, title)): Path<(String, String)>,
    Query(params): Query<DetailParams>,
    jar: CookieJar,
    Extension(library): Extension<Arc<Library>>,
) -> Result<Response, StatusCode> {
    let shelf = Shelf::from_param(&shelf);
    let manga_dir = library.manga_dir(shelf, &title);

    let chapters = library.chapters(&title, shelf).map_err(internal_error)?;
    let info = MangaInfo::load(&manga_dir).map_err(internal_error)?;
    let preview = catalog::find_preview(&manga_dir).map_err(internal_error)?;

    let page = parse_page(params.page.as_deref());
    let (range, total_pages) = page_bounds(chapters.len(), page);

    Ok(views::manga_detail(&views::DetailPage {
        theme: current_theme(&jar),
        shelf,
        title: &title,
        info: &info,
        preview: preview.as_deref(),
        chapters: &chapters[range],
        page,
        total_pages,
    })
    .into_response())
}

pub async fn read_chapter(
    Path((shelf, title, chapter_segment)): Path<(String, String, String)>,
    jar: CookieJar,
    Extension(library): Extension<Arc<Library>>,
) -> Result<Response, StatusCode> {
    let shelf = Shelf::from_param(&shelf);

    let chapters = library.chapters(&title, shelf).map_err(internal_error)?;
    let Some(current) = chapter::resolve(&chapters, &chapter_segment) else {
        return Ok((StatusCode::NOT_FOUND, "Chapter not found").into_response());
    };

    // a chapter shipped as a ready-made page bypasses the reader entirely
    let chapter_dir = library.chapter_dir(shelf, &title, &current.folder);
    if let Some(html_file) = page::find_html_file(&chapter_dir).map_err(internal_error)? {
        let content =
            std::fs::read_to_string(chapter_dir.join(html_file)).map_err(internal_error)?;
        return Ok(Html(content).into_response());
    }

    let pages = library
        .pages(&title, &current.folder, shelf)
        .map_err(internal_error)?;

    Ok(views::read_chapter(&views::ReaderPage {
        theme: current_theme(&jar),
        shelf,
        title: &title,
        current,
        chapters: &chapters,
        pages: &pages,
    })
    .into_response())
}
