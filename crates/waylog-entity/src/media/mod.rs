pub mod model;

pub use model::{MediaAsset, MediaKind};
