//! Exchange identifier newtypes.
//!
//! The exchange hands out plain integers for markets, selections, events and
//! bets. Wrapping them keeps a selection id from being passed where a market
//! id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }

            pub const fn value(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Market identifier.
    MarketId,
    u32
);

numeric_id!(
    /// Runner (selection) identifier, unique within a market.
    SelectionId,
    u32
);

numeric_id!(
    /// Event identifier in the event-type hierarchy.
    EventId,
    u32
);

numeric_id!(
    /// Identifier assigned to a bet once it has been placed.
    BetId,
    u64
);
