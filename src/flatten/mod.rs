//! Path-encoding transform: flatten nested documents into path-keyed maps and back
//!
//! Paths are built with a [`SeparatorStyle`], so the same document can be
//! rendered as `a.b.0`, `a/b/0`, `a[b][0]` or `a_b_0`.

pub mod style;
pub mod flattener;
pub mod unflattener;

pub use style::SeparatorStyle;
pub use flattener::flatten;
pub use unflattener::unflatten;
