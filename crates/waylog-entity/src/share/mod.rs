//! Share-link entities and the policy derivation layer.

pub mod model;
pub mod policy;

pub use model::{CreateShareLink, ShareLink, ShareScope};
pub use policy::{PrivacyPolicy, VisibilityPolicy};
