//! Actix Web server exposing the pages, the joined district layer, and metrics.

use actix_web::{App, HttpResponse, HttpServer, http::header, web};
use anyhow::{Context, Result};
use districts::{LoadOutcome, MapView, ShapeLayer};
use metrics::counter;
use tracing::{error, info, instrument};

use crate::{
    config::SiteConfig,
    data::SiteState,
    html::{home::render_home, map_page::LAYER_PATH, map_page::render_map_page},
    telemetry,
};

/// Build state and serve until the server is stopped.
pub(crate) fn run(config: SiteConfig) -> Result<()> {
    let state = web::Data::new(SiteState::from_config(&config)?);
    let addr = (config.bind.clone(), config.port);

    actix_web::rt::System::new().block_on(async move {
        let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
            .bind(addr.clone())
            .with_context(|| format!("failed to bind {}:{}", addr.0, addr.1))?
            .run();
        info!(
            "serving on http://{}:{} (geometry from {})",
            addr.0, addr.1, config.geometry.location
        );
        server.await.context("HTTP server error")
    })
}

pub(crate) fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_route))
        .route("/ca-house-map", web::get().to(map_route))
        .route(LAYER_PATH, web::get().to(layer_handler))
        .route("/api/districts", web::get().to(districts_handler))
        .route("/metrics", web::get().to(metrics_handler))
        .route("/healthz", web::get().to(health_handler));
}

/// Serve the landing page.
async fn index_route() -> HttpResponse {
    counter!("portfolio_page_views_total", "page" => "home").increment(1);
    html_response("home", render_home())
}

/// Serve the map page; it never waits on the geometry.
async fn map_route(state: web::Data<SiteState>) -> HttpResponse {
    counter!("portfolio_page_views_total", "page" => "ca-house-map").increment(1);
    html_response("ca-house-map", render_map_page(&state.viewport))
}

fn html_response(page: &str, rendered: askama::Result<String>) -> HttpResponse {
    match rendered {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            error!("failed to render {page} page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Mount a map view, load the boundaries and return the joined layer.
///
/// Any failure yields `204 No Content` so the page keeps working without the
/// layer. The view is dropped on every path, releasing its surface, including
/// when the client goes away mid-fetch.
#[instrument(skip_all)]
async fn layer_handler(state: web::Data<SiteState>) -> HttpResponse {
    let mut view = MapView::mount(state.lookup.clone(), ShapeLayer::new());
    match view.load(&state.source, &state.converter).await {
        LoadOutcome::Rendered { .. } => match view.surface() {
            Some(layer) => HttpResponse::Ok()
                .insert_header((header::CACHE_CONTROL, "no-cache"))
                .json(layer.to_feature_collection()),
            None => HttpResponse::NoContent().finish(),
        },
        LoadOutcome::Failed | LoadOutcome::Discarded => HttpResponse::NoContent().finish(),
    }
}

/// The bundled records ordered by district.
async fn districts_handler(state: web::Data<SiteState>) -> HttpResponse {
    HttpResponse::Ok().json(state.lookup.sorted())
}

async fn metrics_handler() -> HttpResponse {
    match telemetry::prometheus_handle() {
        Some(handle) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(handle.render()),
        None => HttpResponse::NoContent().finish(),
    }
}

async fn health_handler() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}
