//! HTTP API for the pay calculation engine.
//!
//! A thin boundary over the engine: `POST /calculate` marshals the
//! [`CalculationResult`](crate::models::CalculationResult) to and from JSON,
//! `GET /health` and `GET /info` report liveness and the loaded rule set.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::ApiError;
pub use state::AppState;
