//! Row identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

row_id!(
    /// Guild war identifier.
    WarId,
    "war"
);
row_id!(
    /// Match identifier, unique across wars.
    MatchId,
    "match"
);
row_id!(
    /// Guild identifier.
    GuildId,
    "guild"
);
