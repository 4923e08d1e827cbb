//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod contact_share;
pub mod event;
pub mod feedback;
pub mod like;
pub mod message;
pub mod profile;

pub use contact_share::ContactShareEntity;
pub use event::EventEntity;
pub use feedback::EventFeedbackEntity;
pub use like::LikeEntity;
pub use message::MessageEntity;
pub use profile::{EventProfileEntity, GenderIdentityDb, InterestedInDb};
