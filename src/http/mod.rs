//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID, open span)
//!     → cors.rs (preflight, CORS headers on every reply)
//!     → relay.rs (extract `url`, call upstream)
//!     → response.rs (200 with relayed body) / error.rs (400, 500)
//!     → Send to client
//! ```

pub mod cors;
pub mod relay;
pub mod request;
pub mod response;
pub mod server;

pub use relay::{relay_handler, RelayParams, RelayState};
pub use request::X_REQUEST_ID;
pub use server::{build_router, RelayServer};
