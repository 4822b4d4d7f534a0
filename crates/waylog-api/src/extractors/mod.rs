//! Custom Axum extractors.

pub mod auth;
pub mod pagination;

pub use auth::AuthOwner;
pub use pagination::PaginationParams;
