//! HTTP services. Each sub-module owns one `/api/...` scope and exposes it
//! through `configure_routes`.

pub mod auth;
pub mod lookup;
pub mod map;
pub mod moderation;
pub mod records;
pub mod reports;
pub mod stats;
