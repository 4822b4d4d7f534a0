//! Business logic services for Waylog.
//!
//! The share module owns the whole token pipeline: minting and digesting,
//! link lifecycle, the liveness gate, and the redaction serializer that
//! produces everything a guest is ever allowed to see.

pub mod context;
pub mod share;
