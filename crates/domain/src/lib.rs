//! Domain layer for the Hooked backend.
//!
//! This crate contains:
//! - Domain models (Event, EventProfile, Like, Message, ContactShare, EventFeedback)
//! - Business logic services (reciprocal-like matcher, discovery filter,
//!   notification scan)

pub mod models;
pub mod services;
