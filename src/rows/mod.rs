//! Row expansion - denormalize repeating list fields into flat rows
//!
//! A document such as
//!
//! ```json
//! {"F0001": "W1", "F0004": [{"C0002": "a"}, {"C0002": "b"}]}
//! ```
//!
//! filtered to `F0001` and `F0004.C0002` becomes one row per list element,
//! each keyed by bare field names:
//!
//! ```json
//! [{"F0001": "W1", "C0002": "a"}, {"F0001": "W1", "C0002": "b"}]
//! ```
//!
//! The filter can be given explicitly or derived from the document itself.

pub mod types;
pub mod filter;
pub mod copy;
pub mod tracks;
pub mod derive;
pub mod expander;
pub mod writer;
mod product;

pub use types::{ExpandConfig, ExpandMode, Row};
pub use filter::Filter;
pub use copy::{deep_copy, deep_copy_row};
pub use tracks::TrackSet;
pub use derive::derive_filter;
pub use expander::RowExpander;
pub use writer::RowWriter;
