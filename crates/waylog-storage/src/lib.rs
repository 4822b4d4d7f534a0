//! Signed URL providers for Waylog media.
//!
//! The [`waylog_core::traits::UrlSigner`] trait is implemented here for a
//! local/dev signer and, behind the `s3` feature, for presigned S3 GETs.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
