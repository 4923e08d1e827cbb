//! Domain services for Hooked.
//!
//! Services contain business logic that operates on domain models.

pub mod discovery;
pub mod matching;
pub mod notification;

pub use discovery::{discover, is_mutually_compatible, passes_filters, DiscoveryFilters};
pub use matching::{
    record_like, InMemoryLikeStore, LikeOutcome, LikeStore, MatchError, MemoryStoreError,
};
pub use notification::{
    scan_notifications, MatchNotice, MatchNotification, NotificationScan, NotificationsResponse,
};
