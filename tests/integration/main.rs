//! Integration test entry point.
//!
//! These tests need a PostgreSQL instance; they skip themselves when
//! `WAYLOG_TEST_DATABASE_URL` is not set.

mod helpers;
mod public_test;
mod share_test;
