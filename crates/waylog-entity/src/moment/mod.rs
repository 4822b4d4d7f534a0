pub mod model;

pub use model::Moment;
