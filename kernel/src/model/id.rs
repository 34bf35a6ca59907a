use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

macro_rules! define_id {
    ($id_type:ident, $raw_type:ty) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $id_type($raw_type);

        impl $id_type {
            pub fn new(raw: $raw_type) -> Self {
                Self(raw)
            }

            pub fn raw(self) -> $raw_type {
                self.0
            }
        }

        impl fmt::Display for $id_type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $id_type {
            type Err = <$raw_type as FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(UserId, i64);
define_id!(AuditoriumId, i32);
define_id!(BookingId, i64);
