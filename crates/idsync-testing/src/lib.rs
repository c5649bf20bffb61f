//! Test utilities for idsync services.
//!
//! Provides webhook payload fixtures and an in-memory store with the schema applied.
//! Import from tests only, never from production code.

pub mod db;
pub mod fixture;
