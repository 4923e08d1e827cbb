//! Request extractors.

pub mod session;

pub use session::{SessionId, SESSION_HEADER};
