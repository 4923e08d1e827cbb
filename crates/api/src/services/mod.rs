//! Request-independent application logic shared by several routes.

pub mod event_access;
pub mod feed;
pub mod live;

pub use event_access::{load_active_event, load_event, require_match, require_profile};
