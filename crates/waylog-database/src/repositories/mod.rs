//! Repository implementations for all Waylog entities.

pub mod media;
pub mod moment;
pub mod profile;
pub mod share_link;
pub mod trip;
