//! HTTP route handlers.

pub mod admin_events;
pub mod contact_shares;
pub mod events;
pub mod feedback;
pub mod health;
pub mod likes;
pub mod live;
pub mod messages;
pub mod notifications;
pub mod profiles;
pub mod sessions;
