//! Persistence layer for the Hooked backend.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - Repository implementations, one per collection

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
