//! API Lambda handler and request processing

pub mod handler;
pub mod helpers;
pub mod multipart;
pub mod parsing;
pub mod routes;
pub mod state;

// Re-export the main handler for convenience
pub use handler::{handle_request, handler};
pub use state::{AppState, Backend};
