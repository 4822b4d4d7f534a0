//! Share-link core: token codec, lifecycle service, liveness gate, and the
//! redaction serializer.

pub mod access;
pub mod payload;
pub mod serializer;
pub mod service;
pub mod token;

pub use access::ShareAccessService;
pub use serializer::RedactionSerializer;
pub use service::ShareLinkService;
pub use token::TokenCodec;
