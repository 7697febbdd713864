//! HTTP host: serves the dashboard page and answers chart requests.
//!
//! Endpoints:
//!   GET /                          → dashboard HTML
//!   GET /api/layout                → page description (controls + chart slots)
//!   GET /api/charts/:slot          → chart spec for a slot, from `?site=&low=&high=`
//!   GET /api/health                → liveness probe

mod html;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::dashboard::{Controls, Dashboard, PageLayout, PayloadRange, SiteSelection};

use html::DASHBOARD_HTML;

type AppState = Arc<Dashboard>;

/// Control values carried on a chart request. Anything missing falls back
/// to the page defaults. Bounds are kept as text so a malformed value
/// reaches the handler instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub site: Option<String>,
    pub low: Option<String>,
    pub high: Option<String>,
}

impl ChartQuery {
    fn controls(&self, dashboard: &Dashboard) -> Controls {
        let default = dashboard.layout().default_range();
        Controls::new(
            SiteSelection::from_value(self.site.as_deref()),
            PayloadRange::new(
                parse_bound("low", self.low.as_deref(), default.low),
                parse_bound("high", self.high.as_deref(), default.high),
            ),
        )
    }
}

/// A missing or blank bound takes the default. An unparseable one becomes
/// NaN, which no payload compares against, so the chart comes back empty.
fn parse_bound(name: &str, value: Option<&str>, default: f64) -> f64 {
    match value.map(str::trim) {
        None | Some("") => default,
        Some(text) => text.parse().unwrap_or_else(|_| {
            warn!(bound = name, value = text, "unparseable payload bound");
            f64::NAN
        }),
    }
}

pub fn router(dashboard: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/layout", get(layout))
        .route("/api/charts/:slot", get(chart))
        .with_state(dashboard)
}

/// Serve the dashboard until Ctrl-C
pub async fn serve(dashboard: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "dashboard listening");

    axum::serve(listener, router(dashboard))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Dashboard server error")?;

    info!("dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn root() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

async fn layout(State(dashboard): State<AppState>) -> Json<PageLayout> {
    Json(dashboard.layout().clone())
}

async fn chart(
    State(dashboard): State<AppState>,
    Path(slot): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Response {
    let controls = query.controls(&dashboard);
    debug!(%slot, site = %controls.site, low = controls.payload.low, high = controls.payload.high, "chart request");

    match dashboard.render_slot(&slot, &controls) {
        Some(spec) => Json(spec).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": format!("unknown chart: {slot}")})),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{layout::PIE_CHART_ID, layout::SCATTER_CHART_ID, ChartSpec, Palette, Renderable};
    use crate::data::sample_table;

    fn state() -> AppState {
        Arc::new(Dashboard::new(sample_table(), Palette::default()))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn query(site: Option<&str>, low: Option<f64>, high: Option<f64>) -> Query<ChartQuery> {
        Query(ChartQuery {
            site: site.map(str::to_string),
            low: low.map(|v| v.to_string()),
            high: high.map(|v| v.to_string()),
        })
    }

    fn query_from(uri: &str) -> Query<ChartQuery> {
        let uri: axum::http::Uri = uri.parse().unwrap();
        Query::try_from_uri(&uri).unwrap()
    }

    #[tokio::test]
    async fn test_pie_matches_direct_handler() {
        let dashboard = state();
        let response = chart(
            State(dashboard.clone()),
            Path(PIE_CHART_ID.to_string()),
            query(Some("SiteA"), None, None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let expected = dashboard.pie().render(&Controls::new(
            SiteSelection::Site("SiteA".to_string()),
            PayloadRange::new(500.0, 2000.0),
        ));
        assert_eq!(body_json(response).await, serde_json::to_value(expected).unwrap());
    }

    #[tokio::test]
    async fn test_scatter_uses_default_range() {
        let dashboard = state();
        let response = chart(
            State(dashboard),
            Path(SCATTER_CHART_ID.to_string()),
            query(None, Some(1000.0), None),
        )
        .await;
        let json = body_json(response).await;
        let spec: ChartSpec = serde_json::from_value(json).unwrap();
        match spec {
            // low = 1000 from the query, high = 2000 from the observed max
            ChartSpec::Scatter(scatter) => {
                let payloads: Vec<f64> = scatter.points().map(|p| p.payload_kg).collect();
                assert_eq!(payloads.len(), 2);
                assert!(payloads.contains(&1500.0));
                assert!(payloads.contains(&2000.0));
            }
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_bound_gives_empty_scatter() {
        let response = chart(
            State(state()),
            Path(SCATTER_CHART_ID.to_string()),
            query_from("/api/charts/success-payload-scatter-chart?low=abc"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let spec: ChartSpec = serde_json::from_value(body_json(response).await).unwrap();
        match spec {
            ChartSpec::Scatter(scatter) => assert!(scatter.is_empty()),
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_query_string_bounds() {
        let response = chart(
            State(state()),
            Path(SCATTER_CHART_ID.to_string()),
            query_from("/api/charts/success-payload-scatter-chart?site=ALL&low=1000&high="),
        )
        .await;
        let spec: ChartSpec = serde_json::from_value(body_json(response).await).unwrap();
        // Blank high falls back to the observed max
        assert_eq!(spec, {
            let dashboard = state();
            dashboard.scatter().render(&Controls::new(
                SiteSelection::All,
                PayloadRange::new(1000.0, 2000.0),
            ))
        });
    }

    #[tokio::test]
    async fn test_root_loads_plotly() {
        let Html(page) = root().await;
        assert!(page.contains("cdn.plot.ly"));
        assert!(page.contains("Plotly.react"));
        assert!(!page.contains("innerHTML"));
    }

    #[tokio::test]
    async fn test_unknown_slot_is_not_found() {
        let response = chart(
            State(state()),
            Path("histogram".to_string()),
            query(None, None, None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_layout_endpoint() {
        let Json(page) = layout(State(state())).await;
        assert_eq!(page.site_dropdown.options.len(), 3);
        assert_eq!(page.charts.len(), 2);
    }

    #[test]
    fn test_query_defaults() {
        let dashboard = state();
        let controls = ChartQuery::default().controls(&dashboard);
        assert_eq!(controls, dashboard.default_controls());
    }
}
