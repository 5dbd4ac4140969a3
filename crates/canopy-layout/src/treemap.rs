//! Squarified treemap tiling.
//!
//! Children are packed row by row in data order. A row keeps growing while
//! its worst aspect ratio improves, measured against the golden ratio; tall
//! remaining areas are diced horizontally, wide ones sliced vertically.
//! Padding follows the nested-box convention: every parent is shrunk by the
//! outer padding, siblings are separated by the inner padding.

use crate::hierarchy::{Hierarchy, HierarchyData, NodeId};
use canopy_core::Size;

/// Golden ratio, the target aspect ratio of squarified rows.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Treemap layout configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Treemap {
    width: f64,
    height: f64,
    padding_inner: f64,
    padding_outer: f64,
    round: bool,
    ratio: f64,
}

impl Treemap {
    /// Tile into a `size.width` x `size.height` box, no padding, no rounding.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            width: f64::from(size.width),
            height: f64::from(size.height),
            padding_inner: 0.0,
            padding_outer: 0.0,
            round: false,
            ratio: PHI,
        }
    }

    /// Set inner and outer padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.max(0.0);
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Set the gap between siblings.
    #[must_use]
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.max(0.0);
        self
    }

    /// Set the inset applied inside every parent.
    #[must_use]
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Round all coordinates to integers after tiling.
    #[must_use]
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Target aspect ratio (values below 1 are raised to 1).
    #[must_use]
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio.max(1.0);
        self
    }

    /// Layout size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Assign bounds to every node of the hierarchy.
    pub fn layout<T: HierarchyData>(&self, hierarchy: &mut Hierarchy<'_, T>) {
        let root = hierarchy.root();
        {
            let node = hierarchy.node_mut(root);
            node.x0 = 0.0;
            node.y0 = 0.0;
            node.x1 = self.width;
            node.y1 = self.height;
        }

        let mut padding_stack = vec![0.0_f64];
        for id in hierarchy.descendants().collect::<Vec<_>>() {
            self.position_node(hierarchy, id, &mut padding_stack);
        }

        if self.round {
            for id in hierarchy.descendants().collect::<Vec<_>>() {
                let node = hierarchy.node_mut(id);
                node.x0 = node.x0.round();
                node.y0 = node.y0.round();
                node.x1 = node.x1.round();
                node.y1 = node.y1.round();
            }
        }
    }

    fn position_node<T: HierarchyData>(
        &self,
        hierarchy: &mut Hierarchy<'_, T>,
        id: NodeId,
        padding_stack: &mut Vec<f64>,
    ) {
        let depth = hierarchy.node(id).depth();
        if padding_stack.len() <= depth + 1 {
            padding_stack.resize(depth + 2, 0.0);
        }

        let p = padding_stack[depth];
        let (x0, y0, x1, y1) = hierarchy.node(id).corners();
        let (x0, x1) = collapse(x0 + p, x1 - p);
        let (y0, y1) = collapse(y0 + p, y1 - p);
        {
            let node = hierarchy.node_mut(id);
            node.x0 = x0;
            node.y0 = y0;
            node.x1 = x1;
            node.y1 = y1;
        }

        if hierarchy.node(id).is_leaf() {
            return;
        }

        let p = self.padding_inner / 2.0;
        padding_stack[depth + 1] = p;
        let inset = self.padding_outer - p;
        let (x0, x1) = collapse(x0 + inset, x1 - inset);
        let (y0, y1) = collapse(y0 + inset, y1 - inset);
        self.squarify(hierarchy, id, x0, y0, x1, y1);
    }

    fn squarify<T: HierarchyData>(
        &self,
        hierarchy: &mut Hierarchy<'_, T>,
        parent: NodeId,
        mut x0: f64,
        mut y0: f64,
        x1: f64,
        y1: f64,
    ) {
        let children = hierarchy.node(parent).children().to_vec();
        let values: Vec<f64> = children
            .iter()
            .map(|c| hierarchy.node(*c).value())
            .collect();
        let n = children.len();
        let mut value = hierarchy.node(parent).value();
        let mut i0 = 0;
        let mut i1 = 0;

        while i0 < n {
            let dx = x1 - x0;
            let dy = y1 - y0;

            // Skip leading empty nodes so a row never starts with zero.
            let mut sum_value = values[i1];
            i1 += 1;
            while sum_value == 0.0 && i1 < n {
                sum_value = values[i1];
                i1 += 1;
            }

            let mut min_value = sum_value;
            let mut max_value = sum_value;
            let alpha = (dy / dx).max(dx / dy) / (value * self.ratio);
            let mut beta = sum_value * sum_value * alpha;
            let mut min_ratio = (max_value / beta).max(beta / min_value);

            while i1 < n {
                let node_value = values[i1];
                sum_value += node_value;
                min_value = min_value.min(node_value);
                max_value = max_value.max(node_value);
                beta = sum_value * sum_value * alpha;
                let new_ratio = (max_value / beta).max(beta / min_value);
                if new_ratio > min_ratio {
                    sum_value -= node_value;
                    break;
                }
                min_ratio = new_ratio;
                i1 += 1;
            }

            let row = &children[i0..i1];
            if dx < dy {
                let row_y1 = if value == 0.0 {
                    y1
                } else {
                    y0 + dy * sum_value / value
                };
                dice(hierarchy, row, sum_value, x0, y0, x1, row_y1);
                if value != 0.0 {
                    y0 = row_y1;
                }
            } else {
                let row_x1 = if value == 0.0 {
                    x1
                } else {
                    x0 + dx * sum_value / value
                };
                slice(hierarchy, row, sum_value, x0, y0, row_x1, y1);
                if value != 0.0 {
                    x0 = row_x1;
                }
            }

            value -= sum_value;
            i0 = i1;
        }
    }
}

/// Collapse an inverted interval onto its midpoint.
fn collapse(lo: f64, hi: f64) -> (f64, f64) {
    if hi < lo {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

/// Lay a row out left to right across `[x0, x1]`, full height.
fn dice<T>(
    hierarchy: &mut Hierarchy<'_, T>,
    row: &[NodeId],
    row_value: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) {
    let k = if row_value == 0.0 {
        0.0
    } else {
        (x1 - x0) / row_value
    };
    let mut x = x0;
    for &id in row {
        let node = hierarchy.node_mut(id);
        node.y0 = y0;
        node.y1 = y1;
        node.x0 = x;
        x += node.value() * k;
        node.x1 = x;
    }
}

/// Lay a row out top to bottom across `[y0, y1]`, full width.
fn slice<T>(
    hierarchy: &mut Hierarchy<'_, T>,
    row: &[NodeId],
    row_value: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) {
    let k = if row_value == 0.0 {
        0.0
    } else {
        (y1 - y0) / row_value
    };
    let mut y = y0;
    for &id in row {
        let node = hierarchy.node_mut(id);
        node.x0 = x0;
        node.x1 = x1;
        node.y0 = y;
        y += node.value() * k;
        node.y1 = y;
    }
}
