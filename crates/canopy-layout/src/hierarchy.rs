//! Hierarchy arena with aggregated values.
//!
//! Nodes are stored in pre-order; a node's children always follow it and its
//! parent always precedes it. Layout passes rely on that ordering.

use canopy_core::Rect;

/// Tree-shaped input the layout engine can consume.
pub trait HierarchyData {
    /// Display name of the node.
    fn name(&self) -> &str;

    /// Value carried by the node itself (leaves); internal nodes usually 0.
    fn own_value(&self) -> f64;

    /// Child nodes, in data order.
    fn children(&self) -> &[Self]
    where
        Self: Sized;
}

/// Index of a node inside a [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A node of the arena: borrowed data plus computed value and bounds.
#[derive(Debug)]
pub struct Node<'a, T> {
    data: &'a T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
    value: f64,
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    pub(crate) x1: f64,
    pub(crate) y1: f64,
}

impl<'a, T> Node<'a, T> {
    /// Borrowed source data.
    #[must_use]
    pub const fn data(&self) -> &'a T {
        self.data
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in data order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Distance from the root.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Own value plus the values of all descendants.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Corner coordinates `(x0, y0, x1, y1)` assigned by the last layout.
    #[must_use]
    pub const fn corners(&self) -> (f64, f64, f64, f64) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    /// Bounds assigned by the last layout.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(
            self.x0 as f32,
            self.y0 as f32,
            self.x1 as f32,
            self.y1 as f32,
        )
    }
}

/// Flattened tree with summed values.
#[derive(Debug)]
pub struct Hierarchy<'a, T> {
    nodes: Vec<Node<'a, T>>,
}

impl<'a, T: HierarchyData> Hierarchy<'a, T> {
    /// Build the arena and sum values bottom-up.
    ///
    /// Negative and non-finite own values count as zero.
    #[must_use]
    pub fn new(root: &'a T) -> Self {
        let mut nodes: Vec<Node<'a, T>> = Vec::new();
        let mut stack: Vec<(&'a T, Option<NodeId>, usize)> = vec![(root, None, 0)];

        while let Some((data, parent, depth)) = stack.pop() {
            let id = NodeId(nodes.len());
            let own = data.own_value();
            nodes.push(Node {
                data,
                parent,
                children: Vec::new(),
                depth,
                value: if own.is_finite() { own.max(0.0) } else { 0.0 },
                x0: 0.0,
                y0: 0.0,
                x1: 0.0,
                y1: 0.0,
            });
            if let Some(p) = parent {
                nodes[p.0].children.push(id);
            }
            for child in data.children().iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }

        // Children come after their parent, so a reverse sweep sees every
        // subtree total before it is added to the parent.
        for i in (1..nodes.len()).rev() {
            if let Some(p) = nodes[i].parent {
                let v = nodes[i].value;
                nodes[p.0].value += v;
            }
        }

        Self { nodes }
    }
}

impl<'a, T> Hierarchy<'a, T> {
    /// Root node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node<'a, T> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<'a, T> {
        &mut self.nodes[id.0]
    }

    /// Total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty (never true for a built hierarchy).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Leaf ids in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants().filter(|id| self.node(*id).is_leaf())
    }

    /// Parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<&Node<'a, T>> {
        self.node(id).parent.map(|p| self.node(p))
    }
}
