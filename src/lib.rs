//! Read only lookup map backed by a sorted array.
//!
//! A [`SortedLookup`] is built once from unordered `(key, value)` pairs or
//! from another map, and is queried by binary search after that.
//!
//! ```rust
//! use sorted_lookup::{Lookup, LookupError, SortedLookup};
//!
//! let mut names = SortedLookup::build([
//!     ("z", "Zillah"),
//!     ("a", "Amy"),
//!     ("c", "Clara"),
//!     ("b", "Basil"),
//! ]);
//!
//! assert_eq!(names.keys().copied().collect::<Vec<_>>(), ["a", "b", "c", "z"]);
//! assert_eq!(names["c"], "Clara");
//! assert!(names.get("m").unwrap_err().is_key_not_found());
//! assert_eq!(
//!     names.try_set("m", "something"),
//!     Err(LookupError::UnsupportedOperation { op: "item assignment" })
//! );
//! ```

mod error;
pub use error::*;

mod lookup;
pub use lookup::*;

mod sorted_lookup;
pub use sorted_lookup::*;

mod bulk_load;

pub mod key_search;
