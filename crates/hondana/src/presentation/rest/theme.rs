use axum::{
    body::Body,
    http::{Response, StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;

pub const THEME_COOKIE: &str = "theme";
const COOKIE_MAX_AGE_SECS: u32 = 86400;

pub fn current_theme(jar: &CookieJar) -> String {
    jar.get(THEME_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_else(|| "light".to_string())
}

/// Flip the theme cookie and bounce back to where the request came from.
pub async fn toggle_theme(
    jar: CookieJar,
    headers: axum::http::HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let next = if current_theme(&jar) == "light" {
        "dark"
    } else {
        "light"
    };

    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/");

    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, referer)
        .header(
            header::SET_COOKIE,
            format!("{THEME_COOKIE}={next}; Max-Age={COOKIE_MAX_AGE_SECS}; Path=/"),
        )
        .body(Body::empty())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
