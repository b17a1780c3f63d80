/*!
 * HTTP dashboard.
 *
 * Routes user input to the repository and renders the results as HTML.
 * All input validation happens here, before any repository call.
 */

use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;

use crate::database::Repository;

pub mod error;
pub mod handlers;
pub mod navigation;
pub mod views;

pub use error::DashboardError;
pub use navigation::{DashboardContext, Page, Section};

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
}

impl AppState {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

/// Build the dashboard routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/register", post(handlers::register))
        .route("/internships", post(handlers::log_internship))
        .route("/feedback", post(handlers::submit_feedback))
        .route("/report.pdf", get(handlers::download_report))
        .route("/health", get(|| async { "OK" }))
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve the dashboard until the process stops
pub async fn run_server(repo: Repository, addr: &str) -> anyhow::Result<()> {
    let app = router(AppState::new(repo));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
