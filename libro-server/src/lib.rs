//! Libro Server Library
//!
//! HTTP shell around `libro-core`: the router, its handlers and shared state.

pub mod handlers;
pub mod routes;
pub mod state;
