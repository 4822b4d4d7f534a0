//! Core traits defined in `waylog-core` and implemented by other crates.

pub mod storage;

pub use storage::UrlSigner;
