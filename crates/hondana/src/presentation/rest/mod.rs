pub mod catalog;
pub mod image;
pub mod manga;
pub mod theme;

use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use maud::Markup;

use crate::presentation::views;

pub(crate) fn internal_error<E: std::fmt::Display>(err: E) -> StatusCode {
    error!("{err}");
    StatusCode::INTERNAL_SERVER_ERROR
}

pub async fn not_found(jar: CookieJar) -> (StatusCode, Markup) {
    (
        StatusCode::NOT_FOUND,
        views::not_found(&theme::current_theme(&jar)),
    )
}
