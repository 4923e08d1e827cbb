//! Shared utilities and common types for the Hooked backend.
//!
//! This crate provides small building blocks used across all other crates:
//! - Session id generation and admin key hashing
//! - Match key derivation for a pair of sessions
//! - Common validation logic

pub mod crypto;
pub mod match_key;
pub mod validation;
