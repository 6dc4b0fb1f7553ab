// Library exports for testing and external use

pub mod app;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
