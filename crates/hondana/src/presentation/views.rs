use maud::{DOCTYPE, Markup, html};

use super::rest::catalog::SortBy;
use crate::library::{Chapter, Manga, MangaInfo, Page, Shelf};

pub struct CatalogPage<'a> {
    pub theme: String,
    pub shelf: Shelf,
    pub entries: &'a [(Manga, Vec<Chapter>)],
    pub page: usize,
    pub total_pages: usize,
    pub search: &'a str,
    pub sort: SortBy,
    pub genre: &'a str,
    pub genres: &'a [String],
}

pub struct DetailPage<'a> {
    pub theme: String,
    pub shelf: Shelf,
    pub title: &'a str,
    pub info: &'a MangaInfo,
    pub preview: Option<&'a str>,
    pub chapters: &'a [Chapter],
    pub page: usize,
    pub total_pages: usize,
}

pub struct ReaderPage<'a> {
    pub theme: String,
    pub shelf: Shelf,
    pub title: &'a str,
    pub current: &'a Chapter,
    pub chapters: &'a [Chapter],
    pub pages: &'a [Page],
}

fn layout(theme: &str, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/static/style.css";
            }
            body class=(theme) {
                header {
                    a .brand href="/" { "Hondana" }
                    nav {
                        a href="/?mode=manga" { "Manga" }
                        a href="/?mode=hentai" { "Hentai" }
                        a href="/toggle-theme" { "Toggle theme" }
                    }
                }
                main { (content) }
            }
        }
    }
}

/// Reader link for a chapter; the oneshot has no folder and is addressed by
/// its number instead.
fn chapter_href(shelf: Shelf, title: &str, chapter: &Chapter) -> String {
    if chapter.folder.is_empty() {
        format!("/{shelf}/{title}/{}", chapter.number)
    } else {
        format!("/{shelf}/{title}/{}", chapter.folder)
    }
}

fn catalog_href(page: &CatalogPage<'_>, target_page: usize) -> String {
    format!(
        "/?mode={}&page={}&search={}&sort={}&genre={}",
        page.shelf,
        target_page,
        page.search,
        page.sort.as_str(),
        page.genre
    )
}

fn page_src(shelf: Shelf, title: &str, folder: &str, filename: &str) -> String {
    if folder.is_empty() {
        format!("/image/{shelf}/{title}/{filename}")
    } else {
        format!("/image/{shelf}/{title}/{folder}/{filename}")
    }
}

fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        format!("{}...", text.chars().take(length).collect::<String>())
    } else {
        text.to_string()
    }
}

pub fn catalog(page: &CatalogPage<'_>) -> Markup {
    layout(
        &page.theme,
        "Hondana",
        html! {
            form .filters action="/" method="get" {
                input type="hidden" name="mode" value=(page.shelf);
                input type="search" name="search" placeholder="Search title" value=(page.search);
                select name="sort" {
                    @for (value, label) in [("title", "Title"), ("rating", "Rating"), ("last_updated", "Last updated")] {
                        option value=(value) selected[page.sort.as_str() == value] { (label) }
                    }
                }
                select name="genre" {
                    option value="" { "All genres" }
                    @for genre in page.genres {
                        option value=(genre) selected[page.genre == genre] { (genre) }
                    }
                }
                button type="submit" { "Apply" }
            }
            div .grid {
                @for (manga, latest) in page.entries {
                    article .card {
                        a href=(format!("/{}/{}", page.shelf, manga.title)) {
                            img src=(manga.preview) alt=(manga.title) loading="lazy";
                            h2 { (manga.title) }
                        }
                        p .meta {
                            span .rating { "★ " (manga.rating) }
                            " · "
                            span .status { (manga.status) }
                        }
                        p .description { (truncate(&manga.description, 200)) }
                        ul .latest {
                            @for chapter in latest {
                                li {
                                    a href=(chapter_href(page.shelf, &manga.title, chapter)) {
                                        (chapter.title)
                                    }
                                }
                            }
                        }
                    }
                }
            }
            nav .pagination {
                @if page.page > 1 {
                    a href=(catalog_href(page, page.page - 1)) { "Previous" }
                }
                span { "Page " (page.page) " of " (page.total_pages) }
                @if page.page < page.total_pages {
                    a href=(catalog_href(page, page.page + 1)) { "Next" }
                }
            }
        },
    )
}

pub fn manga_detail(page: &DetailPage<'_>) -> Markup {
    layout(
        &page.theme,
        page.title,
        html! {
            section .detail {
                @if let Some(preview) = page.preview {
                    img .preview src=(format!("/image/{}/{}/{}", page.shelf, page.title, preview)) alt=(page.title);
                }
                div {
                    h2 { (page.title) }
                    dl {
                        dt { "Author" }
                        dd { (page.info.author()) }
                        dt { "Status" }
                        dd { (page.info.status()) }
                        dt { "Genres" }
                        dd { (page.info.genres().join(", ")) }
                        dt { "Rating" }
                        dd { (page.info.rating()) }
                        dt { "Last updated" }
                        dd { (page.info.last_updated()) }
                    }
                    p { (page.info.description()) }
                }
            }
            ol .chapters {
                @for chapter in page.chapters {
                    li {
                        a href=(chapter_href(page.shelf, page.title, chapter)) { (chapter.title) }
                    }
                }
            }
            nav .pagination {
                @if page.page > 1 {
                    a href=(format!("/{}/{}?page={}", page.shelf, page.title, page.page - 1)) { "Previous" }
                }
                span { "Page " (page.page) " of " (page.total_pages) }
                @if page.page < page.total_pages {
                    a href=(format!("/{}/{}?page={}", page.shelf, page.title, page.page + 1)) { "Next" }
                }
            }
        },
    )
}

pub fn read_chapter(page: &ReaderPage<'_>) -> Markup {
    let position = page
        .chapters
        .iter()
        .position(|chapter| chapter == page.current);
    let previous = position
        .filter(|index| *index > 0)
        .and_then(|index| page.chapters.get(index - 1));
    let next = position.and_then(|index| page.chapters.get(index + 1));

    let navigation = html! {
        nav .reader-nav {
            @if let Some(chapter) = previous {
                a href=(chapter_href(page.shelf, page.title, chapter)) { "Previous chapter" }
            }
            a href=(format!("/{}/{}", page.shelf, page.title)) { "All chapters" }
            @if let Some(chapter) = next {
                a href=(chapter_href(page.shelf, page.title, chapter)) { "Next chapter" }
            }
        }
    };

    layout(
        &page.theme,
        &format!("{} - {}", page.title, page.current.title),
        html! {
            h2 { (page.title) " · " (page.current.title) }
            (navigation)
            div .pages {
                @for image in page.pages {
                    img src=(page_src(page.shelf, page.title, &page.current.folder, &image.filename)) alt=(image.filename) loading="lazy";
                }
            }
            (navigation)
        },
    )
}

pub fn not_found(theme: &str) -> Markup {
    layout(
        theme,
        "Not found",
        html! {
            section .not-found {
                h2 { "404" }
                p { "This page does not exist." }
                a href="/" { "Back to the catalog" }
            }
        },
    )
}
