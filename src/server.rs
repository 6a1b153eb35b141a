mod feed_service;

use axum::{Extension, Router, routing::get};
use clap::Parser;
use http::StatusCode;
use maud::Markup;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::error::Result;
use crate::render::{MountedGate, render_page, render_state};

pub use feed_service::FeedService;

#[derive(Parser)]
pub struct ServerConfig {
  #[clap(long, short, default_value = "127.0.0.1:4080")]
  bind: String,
}

impl ServerConfig {
  pub async fn serve(self, service: FeedService) -> Result<()> {
    info!("listening on {}", self.bind);
    let listener = tokio::net::TcpListener::bind(&self.bind).await?;

    info!("starting server");
    Ok(axum::serve(listener, router(service)).await?)
  }
}

pub fn router(service: FeedService) -> Router {
  Router::new()
    .route("/", get(handle_page))
    .route("/posts", get(handle_posts))
    .route("/health", get(|| async { "ok" }))
    .fallback(get(|| async { (StatusCode::NOT_FOUND, "Not found") }))
    .layer(Extension(service))
    .layer(CompressionLayer::new().gzip(true))
}

async fn handle_page(Extension(service): Extension<FeedService>) -> Markup {
  render_page(service.page_config())
}

// If the client goes away first, the view is dropped and the fetch's
// outcome with it.
async fn handle_posts(Extension(service): Extension<FeedService>) -> Markup {
  let view = MountedGate::new();
  view.load(service.clone()).await;
  render_state(&view.state(), service.page_config())
}
