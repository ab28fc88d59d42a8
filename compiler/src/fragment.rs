use nfa_graph::StateId;

use super::patch::EdgeList;

/// A partially built sub-graph: a single entry state plus every edge
/// downstream of it that has no successor yet.
#[derive(Debug, PartialEq, Eq)]
pub struct Fragment {
    pub entry: StateId,
    pub dangling: EdgeList,
}

impl Fragment {
    pub fn new(entry: StateId, dangling: EdgeList) -> Self {
        Self { entry, dangling }
    }
}
