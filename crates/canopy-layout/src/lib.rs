#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
//! Layout engine for Canopy.
//!
//! Turns a tree of valued nodes into positioned rectangles:
//!
//! - [`Hierarchy`]: pre-order arena over any [`HierarchyData`] with summed values
//! - [`Treemap`]: squarified tiling with padding and integer rounding
//! - [`WrapGrid`]: fixed-pitch wrapped placement for legend entries
//!
//! ```
//! use canopy_core::Size;
//! use canopy_layout::{Hierarchy, HierarchyData, Treemap};
//!
//! struct Item(&'static str, f64, Vec<Item>);
//!
//! impl HierarchyData for Item {
//!     fn name(&self) -> &str { self.0 }
//!     fn own_value(&self) -> f64 { self.1 }
//!     fn children(&self) -> &[Self] { &self.2 }
//! }
//!
//! let root = Item("root", 0.0, vec![Item("a", 1.0, vec![]), Item("b", 3.0, vec![])]);
//! let mut hierarchy = Hierarchy::new(&root);
//! Treemap::new(Size::new(400.0, 100.0)).layout(&mut hierarchy);
//! assert_eq!(hierarchy.leaves().count(), 2);
//! ```

mod grid;
mod hierarchy;
mod treemap;

pub use grid::WrapGrid;
pub use hierarchy::{Hierarchy, HierarchyData, Node, NodeId};
pub use treemap::{Treemap, PHI};
