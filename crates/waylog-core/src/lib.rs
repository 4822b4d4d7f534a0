//! Core building blocks shared by every Waylog crate: configuration,
//! the unified error type, pagination, and the collaborator trait seams.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
