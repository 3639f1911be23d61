//! Search node representation.

/// Direction of a single-variable bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// x_var <= value
    Upper,

    /// x_var >= value
    Lower,
}

/// A bound added by branching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundChange {
    /// Variable index.
    pub var: usize,

    /// Bound direction.
    pub kind: BoundKind,

    /// Bound value (always integral).
    pub value: f64,
}

impl BoundChange {
    /// Create a "down" branch: x <= floor(value).
    pub fn down_branch(var: usize, value: f64) -> Self {
        Self {
            var,
            kind: BoundKind::Upper,
            value: value.floor(),
        }
    }

    /// Create an "up" branch: x >= ceil(value).
    pub fn up_branch(var: usize, value: f64) -> Self {
        Self {
            var,
            kind: BoundKind::Lower,
            value: value.ceil(),
        }
    }

    /// Check whether a point satisfies this bound.
    pub fn admits(&self, x: &[f64]) -> bool {
        match self.kind {
            BoundKind::Upper => x[self.var] <= self.value,
            BoundKind::Lower => x[self.var] >= self.value,
        }
    }
}

/// A node in the B&B search tree.
///
/// Holds every bound accumulated on the path from the root together with the
/// cached relaxation of that region.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Unique node identifier.
    pub id: u64,

    /// Parent node ID (None for root).
    pub parent_id: Option<u64>,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// Bounds added on the path from the root, in branching order.
    pub bound_changes: Vec<BoundChange>,

    /// Relaxation objective (upper bound on this subtree).
    pub obj_val: f64,

    /// Relaxation vertex.
    pub vertex: Vec<f64>,
}

impl SearchNode {
    /// Create the root node.
    pub fn root() -> Self {
        Self {
            id: 0,
            parent_id: None,
            depth: 0,
            bound_changes: Vec::new(),
            obj_val: f64::INFINITY,
            vertex: Vec::new(),
        }
    }

    /// Create a child node from a bound change.
    ///
    /// The child starts with the parent's bound as its own relaxation value
    /// until a relaxation is attached.
    pub fn child(&self, id: u64, bound_change: BoundChange) -> Self {
        let mut bound_changes = Vec::with_capacity(self.bound_changes.len() + 1);
        bound_changes.extend_from_slice(&self.bound_changes);
        bound_changes.push(bound_change);

        Self {
            id,
            parent_id: Some(self.id),
            depth: self.depth + 1,
            bound_changes,
            obj_val: self.obj_val,
            vertex: Vec::new(),
        }
    }

    /// Attach a solved relaxation.
    pub fn with_relaxation(mut self, obj_val: f64, vertex: Vec<f64>) -> Self {
        self.obj_val = obj_val;
        self.vertex = vertex;
        self
    }
}
