//! Shared domain for the inventory registry.
//!
//! Everything in this crate is free of I/O so that the backend (native) and the
//! frontend (wasm) run exactly the same rules:
//!
//! - `model`: reference data (settlements, lookup index), the record draft and
//!   the coerced record shapes stored by the backend.
//! - `form`: the draft reducer that keeps cascading selections consistent.
//! - `validation`: the fail-fast validation gate run before submission.
//! - `moderation`: the in-memory walker over pending records.
//! - `map`: coordinate parsing/formatting for the map point selector.
//! - `requests`: request and response payloads of the HTTP API.

pub mod form;
pub mod map;
pub mod model;
pub mod moderation;
pub mod requests;
pub mod validation;
