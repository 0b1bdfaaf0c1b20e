//! Opaque id newtypes.
//!
//! Ids are how features refer to things they do not own: a syntax node in
//! their document's tree, or another document in the [`DocumentTable`](crate::DocumentTable).

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an id from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifies a document in a [`DocumentTable`](crate::DocumentTable).
    DocumentId,
    "doc#"
);

define_id!(
    /// Identifies a node in a document's [`SyntaxTree`](crate::SyntaxTree).
    NodeId,
    "node#"
);
