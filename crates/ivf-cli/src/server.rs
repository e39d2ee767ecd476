use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::RawQuery;
use axum::response::{Html, Json, Redirect};
use axum::routing::get;
use ivf_core::{ResultSummary, SurveyAnswers, decode, encode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use url::form_urlencoded;

use crate::config::ServerConfig;
use crate::pages;

pub const FORM_PATH: &str = "/calculator";
pub const RESULT_PATH: &str = "/calculator/result";

pub fn router(config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/", get(root))
        .route(FORM_PATH, get(form_page).post(submit_form))
        .route(RESULT_PATH, get(result_page))
        .route("/api/score", get(api_score))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http());
    if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind and serve until Ctrl-C or SIGTERM.
pub async fn serve(addr: SocketAddr, config: &ServerConfig) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr().context("failed to read bound address")?;
    tracing::info!("calculator listening on http://{local}{FORM_PATH}");

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

async fn root() -> Redirect {
    Redirect::to(FORM_PATH)
}

async fn form_page() -> Html<String> {
    Html(pages::render_form(&SurveyAnswers::default()))
}

/// Form body -> answers -> transport query -> redirect to the results page.
async fn submit_form(body: Bytes) -> Redirect {
    let answers = SurveyAnswers::from_form(form_urlencoded::parse(&body));
    let query = encode(&answers);
    tracing::debug!("form submitted, redirecting with {query}");
    Redirect::to(&format!("{RESULT_PATH}?{query}"))
}

async fn result_page(RawQuery(query): RawQuery) -> Html<String> {
    let summary = ResultSummary::from_record(&decode(query.as_deref().unwrap_or("")));
    tracing::debug!(rate = summary.rate, "rendered result");
    Html(pages::render_result(&summary))
}

async fn api_score(RawQuery(query): RawQuery) -> Json<serde_json::Value> {
    let record = decode(query.as_deref().unwrap_or(""));
    let summary = ResultSummary::from_record(&record);
    let inputs: serde_json::Map<String, serde_json::Value> = record
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
        .collect();
    Json(serde_json::json!({
        "rate": summary.rate,
        "rateDisplay": summary.rate_display,
        "breakdown": summary.breakdown,
        "inputs": inputs,
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "ok": true,
        "message": "IVF calculator is alive",
    }))
}
