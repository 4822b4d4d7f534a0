//! HTTP API layer for Waylog.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod rate_limit;
pub mod router;
pub mod state;
