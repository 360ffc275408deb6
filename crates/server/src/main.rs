// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod routes;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    extract::FromRef,
    routing::{delete, get, post, put},
};
use clap::Parser;
use reloc_api::DEFAULT_MAX_CONFLICT_RETRIES;
use reloc_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::live::{LiveEventBroadcaster, live_events_handler};
use crate::routes::{
    handle_add_observation, handle_approve, handle_begin_validation, handle_cancel,
    handle_create_contract, handle_create_draft, handle_create_employee, handle_create_task,
    handle_delete_observation, handle_delete_task, handle_extend_due_date,
    handle_generate_standard_tasks, handle_get_contract, handle_get_employee, handle_get_record,
    handle_get_record_audit, handle_get_request, handle_invalidate, handle_list_observations,
    handle_open_request, handle_reject, handle_set_due_date, handle_submit,
    handle_transition_task, handle_update_observation, handle_validate,
};

/// Relocation server - HTTP server for the employee relocation workflow
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Retries of a transition that lost an optimistic-lock race
    #[arg(long, default_value_t = DEFAULT_MAX_CONFLICT_RETRIES)]
    max_conflict_retries: u32,
}

/// Application state shared across handlers.
///
/// Persistence sits behind a Mutex; the broadcaster is independent of it.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Fan-out of live workflow events.
    pub live: Arc<LiveEventBroadcaster>,
    /// Retry bound for optimistic-lock conflicts.
    pub max_conflict_retries: u32,
}

impl AppState {
    /// Creates application state around an opened persistence layer.
    pub fn new(persistence: Persistence, max_conflict_retries: u32) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            live: Arc::new(LiveEventBroadcaster::new()),
            max_conflict_retries,
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live)
    }
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/requests", post(handle_open_request))
        .route("/requests/{request_id}", get(handle_get_request))
        .route("/records/{record_id}", get(handle_get_record))
        .route("/records/{record_id}/approve", post(handle_approve))
        .route("/records/{record_id}/reject", post(handle_reject))
        .route("/records/{record_id}/draft", post(handle_create_draft))
        .route("/records/{record_id}/submit", post(handle_submit))
        .route(
            "/records/{record_id}/begin_validation",
            post(handle_begin_validation),
        )
        .route("/records/{record_id}/validate", post(handle_validate))
        .route("/records/{record_id}/invalidate", post(handle_invalidate))
        .route("/records/{record_id}/cancel", post(handle_cancel))
        .route("/records/{record_id}/audit", get(handle_get_record_audit))
        .route("/records/{record_id}/tasks", post(handle_create_task))
        .route(
            "/records/{record_id}/tasks/standard",
            post(handle_generate_standard_tasks),
        )
        .route("/tasks/{task_id}", delete(handle_delete_task))
        .route("/tasks/{task_id}/transition", post(handle_transition_task))
        .route("/tasks/{task_id}/due_date", post(handle_set_due_date))
        .route("/tasks/{task_id}/extension", post(handle_extend_due_date))
        .route(
            "/tasks/{task_id}/observations",
            get(handle_list_observations).post(handle_add_observation),
        )
        .route(
            "/observations/{observation_id}",
            put(handle_update_observation).delete(handle_delete_observation),
        )
        .route("/employees", post(handle_create_employee))
        .route("/employees/{employee_id}", get(handle_get_employee))
        .route("/contracts", post(handle_create_contract))
        .route("/contracts/{contract_id}", get(handle_get_contract))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing relocation server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app: Router = build_router(AppState::new(persistence, args.max_conflict_retries));

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
