//! Genealogy trees from line-oriented text.
//!
//! Input lines have the shape `parent:child1,child2,...`; blank lines and
//! `#` comments are skipped. Node names are a generic type produced by a
//! caller-supplied converter, so a tree can be keyed by strings, numbers, or
//! anything hashable. Once built, the tree answers most-recent-common-ancestor
//! queries and renders itself as an indented dump.
//!
//! ```
//! use kintree::FamilyTree;
//!
//! let mut tree = FamilyTree::from_str_names();
//! tree.add_lines(["Root:A,B", "A:C,D", "B:E"]).unwrap();
//!
//! let mrca = tree
//!     .most_recent_common_ancestor(&"C".to_string(), &"E".to_string())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(mrca.name, "Root");
//! ```

pub mod arena;
pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod query;
pub mod util;

pub use arena::{TreeArena, TreeNode};
pub use builder::{Converter, FamilyTree};
pub use config::Settings;
pub use errors::{TreeError, TreeResult};
pub use query::most_recent_common_ancestor;
