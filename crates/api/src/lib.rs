//! The admin HTTP API and metrics HTTP endpoint.
//!
//! Both are out-of-scope collaborators — this crate
//! implements only their fixed observable contract: read/update config over
//! HTTP Basic auth, send on the restart channel after a successful update,
//! and expose the two Prometheus histograms infrastructure records.

mod auth;
mod handlers;
mod routes;
mod server;
mod state;

pub use routes::{admin_routes, metrics_routes};
pub use server::{serve_admin, serve_metrics};
pub use state::AppState;
