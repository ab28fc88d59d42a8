//! Dangling edge bookkeeping for fragments under construction.

use nfa_graph::{Edge, GraphBuilder, StateId};

/// One unassigned successor field of a state in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub state: StateId,
    pub edge: Edge,
}

impl Slot {
    pub fn new(state: StateId, edge: Edge) -> Self {
        Self { state, edge }
    }

    pub fn primary(state: StateId) -> Self {
        Self::new(state, Edge::Primary)
    }

    pub fn alt(state: StateId) -> Self {
        Self::new(state, Edge::Alt)
    }
}

/// Every slot of a fragment still waiting on a successor.
///
/// A list is consumed when patched, so the same set of slots can't be
/// assigned twice through it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EdgeList(Vec<Slot>);

impl EdgeList {
    pub fn singleton(slot: Slot) -> Self {
        Self(vec![slot])
    }

    /// Concatenates two lists, preserving the order of both.
    #[must_use]
    pub fn append(mut self, mut other: Self) -> Self {
        self.0.append(&mut other.0);
        self
    }

    /// Points every slot in the list at `target`.
    pub fn patch(self, builder: &mut GraphBuilder, target: StateId) {
        for Slot { state, edge } in self.0 {
            builder.patch_edge_mut(state, edge, target);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.0.iter()
    }
}
