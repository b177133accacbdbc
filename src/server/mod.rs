//! HTTP shell serving the rendered pages
//!
//! The `ServerBuilder` wires the bill store, the views and the
//! configuration into an axum router.

pub mod builder;
pub mod extractors;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use extractors::{CurrentSession, SESSION_HEADER};
pub use handlers::AppState;
