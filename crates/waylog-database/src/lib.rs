//! # waylog-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Waylog entities. SQL lives here and nowhere
//! else.

pub mod connection;
pub mod migration;
pub mod repositories;
