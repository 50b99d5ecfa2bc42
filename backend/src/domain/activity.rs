//! Device tap log.

use super::{ActivityId, Device, UserProfile};

/// An immutable record of a member tapping a reader.
///
/// `created_at` is unix seconds. Repeated taps are all kept; debouncing is
/// the device's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: ActivityId,
    pub created_at: i64,
    pub user: UserProfile,
    pub device: Device,
}
