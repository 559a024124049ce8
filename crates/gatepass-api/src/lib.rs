//! # gatepass-api
//!
//! HTTP surface of the gate-pass backend.
//!
//! Authentication happens upstream: a gateway verifies the session and
//! forwards the user id in the `x-user-id` header. Every `/api` route loads
//! that user as the [`Actor`](actor::Actor) and answers 401 when it is
//! missing or unknown.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod actor;
pub mod error;
pub mod routes;
pub mod state;

use actor::USER_ID_HEADER;
use state::AppState;

/// Build the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, USER_ID_HEADER])
        .max_age(Duration::from_secs(state.server.cors_max_age_secs));

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/api/student/check", post(routes::check))
        .route("/api/student/my-logs", get(routes::my_logs))
        .route("/api/student/last-log", get(routes::last_log))
        .route("/api/student/me", get(routes::me))
        .route("/api/guard/logs", get(routes::guard_logs))
        .fallback(routes::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    info!(%address, "server running");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

/// Bind `server.address()` and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns the I/O error from binding or serving.
pub async fn run(state: Arc<AppState>) -> std::io::Result<()> {
    let address = state.server.address();
    info!(%address, "binding");
    let listener = TcpListener::bind(&address).await?;
    serve(listener, state, shutdown_signal()).await
}

/// Resolves on Ctrl+C, or on SIGTERM where available.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
