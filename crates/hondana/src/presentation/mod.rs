pub mod assets;
pub mod rest;
pub mod views;

use std::{net::SocketAddr, sync::Arc};

use anyhow::anyhow;
use axum::{Router, extract::Extension, response, routing::get};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

use crate::library::Library;

async fn health_check() -> impl response::IntoResponse {
    response::Html("OK")
}

pub struct ServerBuilder {
    library: Option<Arc<Library>>,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self { library: None }
    }

    pub fn with_library(self, library: Arc<Library>) -> Self {
        Self {
            library: Some(library),
        }
    }

    pub fn build(self) -> Result<Server, anyhow::Error> {
        let library = self.library.ok_or_else(|| anyhow!("no library"))?;

        Ok(Server::new(library))
    }
}

pub struct Server {
    router: Router,
}

impl Server {
    pub fn new(library: Arc<Library>) -> Self {
        // static segments win over the shelf captures, so /image, /api,
        // /static and /health never reach the manga routes
        let router = Router::new()
            .route("/", get(rest::catalog::index))
            .route("/toggle-theme", get(rest::theme::toggle_theme))
            .route("/api/search", get(rest::catalog::api_search))
            .route("/image/{*path}", get(rest::image::fetch_image))
            .route("/static/{*path}", get(assets::static_handler))
            .route("/health", get(health_check))
            .route("/{shelf}/{title}", get(rest::manga::manga_detail))
            .route("/{shelf}/{title}/{chapter}", get(rest::manga::read_chapter))
            .fallback(rest::not_found)
            .layer(Extension(library))
            .layer(CompressionLayer::new())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );

        Self { router }
    }

    pub async fn serve<A: Into<SocketAddr>>(self, addr: A) -> Result<(), anyhow::Error> {
        axum_server::bind(addr.into())
            .serve(self.router.into_make_service())
            .await?;

        Ok(())
    }
}
