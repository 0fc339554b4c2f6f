//! The HTTP surface: one dashboard page plus a health probe.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::chart;
use crate::data::Sampler;
use crate::page;

/// Serve the dashboard until the process exits.
///
/// Every request to `/` runs one sampling tick before rendering, so the
/// page reflects a fresh observation whenever the store is reachable.
pub async fn run_server(listen_addr: &str, sampler: Arc<Sampler>) -> Result<()> {
    let addr: SocketAddr = listen_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "dashboard listening");

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let sampler = sampler.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                let sampler = sampler.clone();
                async move { handle_request(req, &sampler).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                error!(error = %e, "connection error");
            }
        });
    }
}

async fn handle_request<B>(
    req: Request<B>,
    sampler: &Arc<Sampler>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    match req.uri().path() {
        "/" => Ok(dashboard(sampler).await),
        "/health" | "/healthz" => Ok(text_response(StatusCode::OK, "OK")),
        _ => Ok(text_response(StatusCode::NOT_FOUND, "Not Found")),
    }
}

/// Render the dashboard page.
///
/// A failed tick degrades to the last successfully sampled totals so the
/// page stays available through transient store outages; only a render
/// failure turns into an error response.
async fn dashboard(sampler: &Arc<Sampler>) -> Response<Full<Bytes>> {
    let totals = match sampler.sample().await {
        Ok(totals) => totals,
        Err(e) => {
            warn!(error = %e, "request-driven tick failed, serving last sample");
            sampler.store().last_observed()
        }
    };

    let snapshot = sampler.store().snapshot();
    match chart::render(&snapshot) {
        Ok(svg) => {
            let html = page::format_page(&totals, &chart::data_uri(&svg));
            html_response(StatusCode::OK, html)
        }
        Err(e) => {
            error!(error = %e, "chart rendering failed");
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "chart rendering failed")
        }
    }
}

fn html_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn text_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}
