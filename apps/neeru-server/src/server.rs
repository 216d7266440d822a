use std::future::IntoFuture;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use supply_points::SupplyPointsModule;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::signals;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Host router: health probe plus every module route, with request tracing.
pub fn build_router(module: &SupplyPointsModule) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(module.router())
        .layer(TraceLayer::new_for_http())
}

/// Cancel `token` once `primary` sees a shutdown signal, or once `fallback`
/// does when `primary` cannot wait.
async fn cancel_on_signal<P, F>(primary: P, fallback: F, token: CancellationToken)
where
    P: Future<Output = Result<()>>,
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = primary.await {
        tracing::warn!(error = %e, "Signal waiter failed, falling back to Ctrl+C");
        if let Err(e) = fallback.await {
            tracing::error!(error = %e, "Ctrl+C handler failed, shutting down");
        }
    }
    token.cancel();
}

/// Serve until a shutdown signal arrives, then drain for at most
/// `server.shutdown_timeout_ms`.
///
/// # Errors
/// Fails when the module cannot be built or the socket cannot be bound.
pub async fn run(config: AppConfig) -> Result<()> {
    let addr = config.server.socket_addr()?;
    let module = SupplyPointsModule::from_config(&config.supply_points)?;
    let router = build_router(&module);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening");

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(
        signals::wait_for_shutdown(),
        tokio::signal::ctrl_c(),
        cancel.clone(),
    ));

    let grace = Duration::from_millis(config.server.shutdown_timeout_ms);
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(cancel.clone().cancelled_owned())
        .into_future();

    tokio::select! {
        result = server => result.context("HTTP server failed")?,
        () = async {
            cancel.cancelled().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(timeout_ms = config.server.shutdown_timeout_ms, "Shutdown grace period elapsed, dropping open connections");
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use supply_points::config::SupplyPointsConfig;
    use tower::ServiceExt;

    fn router() -> Router {
        let module = SupplyPointsModule::from_config(&SupplyPointsConfig::default()).unwrap();
        build_router(&module)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "status": "ok" }));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn failed_fallback_waiter_is_logged_before_cancelling() {
        let token = CancellationToken::new();

        cancel_on_signal(
            async { Err::<(), _>(anyhow::anyhow!("no SIGTERM handler")) },
            async { Err::<(), _>(std::io::Error::other("ctrl_c unavailable")) },
            token.clone(),
        )
        .await;

        assert!(token.is_cancelled());
        assert!(logs_contain("no SIGTERM handler"));
        assert!(logs_contain("ctrl_c unavailable"));
    }

    #[tokio::test]
    async fn signal_cancels_without_touching_the_fallback() {
        let token = CancellationToken::new();

        cancel_on_signal(
            async { Ok::<(), anyhow::Error>(()) },
            std::future::pending(),
            token.clone(),
        )
        .await;

        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn module_routes_are_mounted() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/supply-points/v1/board")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
