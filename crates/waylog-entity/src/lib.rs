//! Domain entity models for Waylog.
//!
//! Row structs map 1:1 onto the Postgres schema via `sqlx::FromRow`. The
//! share policy module derives strongly-typed privacy/visibility policies
//! from the sparse override map stored on each share link.

pub mod media;
pub mod moment;
pub mod profile;
pub mod share;
pub mod trip;
