//! Store-assigned identifiers.
//!
//! Every entity id is a distinct newtype so a `RoleId` cannot be passed where
//! a `LocationId` is expected. Values come from PostgreSQL sequences and are
//! never reused.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wrap a raw store identifier.
            #[must_use]
            pub const fn new(raw: $inner) -> Self {
                Self(raw)
            }

            /// Raw store identifier.
            #[must_use]
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(raw: $inner) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered member.
    UserId(i32)
);
define_id!(
    /// Identifier of a device role such as `cleaning`.
    RoleId(i32)
);
define_id!(
    /// Identifier of a physical location.
    LocationId(i32)
);
define_id!(
    /// Identifier of an NFC reader.
    DeviceId(i32)
);
define_id!(
    /// Identifier of a scheduled shift; stable across exchanges.
    ShiftId(i32)
);
define_id!(ActivityId(i64));
