//! Search tree recording the bisection history of a root search.
//!
//! The tree is stored in an arena and its nodes are addressed by [`NodeId`].
//! A node is either a [leaf](Node::Leaf) holding a [`Root`] and a [`Marker`]
//! telling whether the leaf still needs to be processed, or a
//! [branching](Node::Branching) node with exactly two children produced by a
//! bisection of the region the node used to hold.
//!
//! Nodes are never removed. A working leaf is either finalized or replaced
//! by a branching node, so the leaves of the tree always cover the original
//! search region.

use std::fmt;

use crate::core::Root;

/// Handle of a node in the [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Index of the node in the order of creation. The root node has index
    /// zero.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Processing state of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The leaf is waiting in the worklist.
    Working,
    /// The leaf is resolved and will not be processed anymore.
    Final,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Working => f.write_str("working"),
            Marker::Final => f.write_str("final"),
        }
    }
}

/// Node of the [`SearchTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The region of the node was split into two children, lower one first.
    Branching {
        /// The children.
        children: [NodeId; 2],
    },
    /// Unsplit region.
    Leaf {
        /// The root held by the leaf.
        root: Root,
        /// Whether the leaf still needs to be processed.
        marker: Marker,
    },
}

impl Node {
    /// Returns `true` if the node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

#[derive(Debug, Clone)]
struct Entry {
    node: Node,
    parent: Option<NodeId>,
    depth: usize,
}

/// Binary tree of the regions visited by a root search.
///
/// See [module](self) documentation for more details.
#[derive(Debug, Clone)]
pub struct SearchTree {
    entries: Vec<Entry>,
}

impl SearchTree {
    /// Creates a tree with a single working leaf.
    pub fn new(root: Root) -> Self {
        Self {
            entries: vec![Entry {
                node: Node::Leaf {
                    root,
                    marker: Marker::Working,
                },
                parent: None,
                depth: 0,
            }],
        }
    }

    /// Returns the id of the root node of the tree.
    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The tree always has at least one node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the node with given id.
    ///
    /// # Panics
    ///
    /// If the id does not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.entries[id.0].node
    }

    /// Returns the parent of the node, or `None` for the root node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries[id.0].parent
    }

    /// Returns the depth of the node. The root node has depth zero.
    pub fn depth(&self, id: NodeId) -> usize {
        self.entries[id.0].depth
    }

    /// Returns the children of a branching node.
    pub fn children(&self, id: NodeId) -> Option<[NodeId; 2]> {
        match self.node(id) {
            Node::Branching { children } => Some(*children),
            Node::Leaf { .. } => None,
        }
    }

    /// Returns the maximum depth of the leaves.
    pub fn height(&self) -> usize {
        self.entries.iter().map(|e| e.depth).max().unwrap_or(0)
    }

    /// Iterates over the leaves from left to right, that is, in the depth
    /// first order with lower children first.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            tree: self,
            stack: vec![self.root_id()],
        }
    }

    /// Returns the number of leaves that still need processing.
    pub fn n_working(&self) -> usize {
        self.count(Marker::Working)
    }

    /// Returns the number of resolved leaves, including the ones without
    /// roots.
    pub fn n_final(&self) -> usize {
        self.count(Marker::Final)
    }

    fn count(&self, which: Marker) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.node, Node::Leaf { marker, .. } if marker == which))
            .count()
    }

    /// Collects the roots of final leaves from left to right. Regions
    /// without roots are left out.
    pub fn roots(&self) -> Vec<Root> {
        self.leaves()
            .filter(|(_, root, marker)| *marker == Marker::Final && !root.is_empty())
            .map(|(_, root, _)| root.clone())
            .collect()
    }

    /// Returns the root of the leaf if it is a working leaf.
    pub(crate) fn working_root(&self, id: NodeId) -> Option<&Root> {
        match self.entries.get(id.0).map(|e| &e.node) {
            Some(Node::Leaf {
                root,
                marker: Marker::Working,
            }) => Some(root),
            _ => None,
        }
    }

    /// Replaces the root held by a leaf.
    pub(crate) fn set_root(&mut self, id: NodeId, new: Root) {
        if let Node::Leaf { root, .. } = &mut self.entries[id.0].node {
            *root = new;
        }
    }

    /// Marks a leaf as resolved.
    pub(crate) fn finalize(&mut self, id: NodeId) {
        if let Node::Leaf { marker, .. } = &mut self.entries[id.0].node {
            *marker = Marker::Final;
        }
    }

    /// Replaces a leaf by a branching node with two working leaves.
    pub(crate) fn branch(&mut self, id: NodeId, lower: Root, upper: Root) -> [NodeId; 2] {
        let depth = self.entries[id.0].depth + 1;
        let children = [NodeId(self.entries.len()), NodeId(self.entries.len() + 1)];

        for root in [lower, upper] {
            self.entries.push(Entry {
                node: Node::Leaf {
                    root,
                    marker: Marker::Working,
                },
                parent: Some(id),
                depth,
            });
        }

        self.entries[id.0].node = Node::Branching { children };
        children
    }
}

impl fmt::Display for SearchTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![self.root_id()];

        while let Some(id) = stack.pop() {
            let indent = 2 * self.depth(id);

            match self.node(id) {
                Node::Branching { children } => {
                    writeln!(f, "{:indent$}Branching", "", indent = indent)?;
                    stack.push(children[1]);
                    stack.push(children[0]);
                }
                Node::Leaf { root, marker } => {
                    writeln!(f, "{:indent$}Leaf ({}) {}", "", marker, root, indent = indent)?;
                }
            }
        }

        Ok(())
    }
}

/// Iterator over the leaves of a [`SearchTree`], see
/// [`SearchTree::leaves`].
pub struct Leaves<'a> {
    tree: &'a SearchTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (NodeId, &'a Root, Marker);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            match self.tree.node(id) {
                Node::Branching { children } => {
                    self.stack.push(children[1]);
                    self.stack.push(children[0]);
                }
                Node::Leaf { root, marker } => return Some((id, root, *marker)),
            }
        }

        None
    }
}
