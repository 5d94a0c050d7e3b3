use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw integer key as stored in the database.
            #[must_use]
            pub const fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
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

define_id!(ItemId, "Unique identifier for a catalogued item.");
define_id!(CollectionId, "Unique identifier for a collection.");
define_id!(ItemTypeId, "Unique identifier for an item type.");
define_id!(ElementId, "Unique identifier for a metadata element.");
define_id!(TagId, "Unique identifier for a tag.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = ItemId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(id, ItemId::from(42));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ItemTypeId::new(4).to_string(), "4");
    }
}
