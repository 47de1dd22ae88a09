//! Feedeyes: multi-user feed report tracking behind cookie sessions.
//!
//! Hexagonal layout:
//! - [`domain`]: entities, services and ports.
//! - [`inbound::http`]: Actix handlers, session gate and HTML views.
//! - [`outbound::persistence`]: Diesel adapters over a `bb8` pool.
//! - [`middleware`]: request tracing.
//! - [`config`]: environment-driven settings.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
