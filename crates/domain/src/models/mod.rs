//! Domain models for Hooked.

pub mod contact_share;
pub mod event;
pub mod feedback;
pub mod like;
pub mod message;
pub mod profile;
pub mod session;

pub use contact_share::ContactShare;
pub use event::{Event, EventAccessError, EventStatus};
pub use feedback::EventFeedback;
pub use like::{Like, MatchSide};
pub use message::Message;
pub use profile::{EventProfile, GenderIdentity, InterestedIn};
pub use session::SessionContext;
