pub mod app;
mod deserializers;
pub mod error;
mod extract;
pub mod pagination;
mod routes;

pub use app::{app, run_server, AppState, API_PREFIX};
pub use error::ApiError;
