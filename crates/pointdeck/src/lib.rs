//! Pointdeck server: the HTTP and WebSocket boundary.
//!
//! This crate ties the layers together: axum routes → WebSocket
//! connection handlers → room engine and broadcast hub. It owns
//! everything connection-shaped; all room rules live in
//! `pointdeck-engine` and all fan-out in `pointdeck-hub`.

mod actions;
mod config;
mod routes;
mod ws;

pub use config::ServerConfig;
pub use routes::{build_routes, AppState};
