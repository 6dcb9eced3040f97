//! Cross-origin HTTP relay.
//!
//! Forwards `GET ?url=<target>` to an arbitrary external API and returns
//! the response body, with CORS headers permitting any origin.
//!
//! ```text
//!     Client ──▶ request ID ──▶ trace ──▶ CORS ──▶ relay handler ──▶ upstream GET
//!     Client ◀──────────────────────────────────── 200 body / 400 / 500 ◀──┘
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::RelayServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
