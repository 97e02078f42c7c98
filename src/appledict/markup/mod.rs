//! Read-only markup trees for entry fragments.
//!
//! - [`tree`]: parsing a fragment into an arena of tagged nodes with parent links
//! - [`query`]: tag/class filters and the cardinality-checked lookups the grammar relies on

pub mod query;
pub mod tree;

pub use query::{find_at_least_one, find_at_most_one, find_exactly_one, Depth, Query};
pub use tree::{MarkupTree, Node, NodeId};
