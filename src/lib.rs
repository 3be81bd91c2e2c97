//! # An ordered map backed by an unbalanced binary search tree
//!
//! `bst-map` provides [`BstMap`], a key-value map whose entries live in a
//! plain binary search tree.  The tree is never rebalanced, so its shape (and
//! the cost of every lookup) depends on the order in which keys were first
//! inserted.  Each node exclusively owns its two children; dropping a node
//! drops its whole subtree.
//!
//! Removal is deliberately absent.  [`BstMap::erase`] resets a value to its
//! default but leaves the key in the map.
//!
//! ```
//! use bst_map::BstMap;
//!
//! let mut m = BstMap::new();
//! m.put(5, "Angus");
//! m.put(2, "Balthazar");
//! m.put(3, "Zachary");
//! m.put(4, "Yippy");
//! m.put(1, "Xaviar");
//! m.put(4, "Waggy");
//! m.put(6, "Viktor");
//!
//! assert_eq!(
//!     m.to_string(),
//!     "(1, Xaviar) (2, Balthazar) (3, Zachary) (4, Waggy) (5, Angus) (6, Viktor)"
//! );
//! ```

mod error;
pub use error::{Error, Result};

pub mod bst;
pub use bst::BstMap;

#[cfg(feature = "serde")]
mod serde;
