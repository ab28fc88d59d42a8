use std::collections::VecDeque;

use super::{Graph, State, StateId};

/// Represents an iterator over all direct successors for a given state, in
/// priority order.
pub struct Successors<'g> {
    state: &'g State,
    next: Option<crate::Edge>,
}

impl<'g> Successors<'g> {
    pub(crate) fn new(state: &'g State) -> Self {
        Self {
            state,
            next: Some(crate::Edge::Primary),
        }
    }
}

impl<'g> Iterator for Successors<'g> {
    type Item = StateId;

    fn next(&mut self) -> Option<Self::Item> {
        use crate::Edge;

        loop {
            let edge = self.next?;
            self.next = match edge {
                Edge::Primary => Some(Edge::Alt),
                Edge::Alt => None,
            };

            if let Some(target) = self.state.edge(edge) {
                return Some(target);
            }
        }
    }
}

/// Provides breadth-first traversal over a graph, visiting each reachable
/// state once.
pub struct BreadthFirstTraversal<'g> {
    visited: Vec<bool>,
    graph: &'g Graph,
    queue: VecDeque<StateId>,
}

impl<'g> BreadthFirstTraversal<'g> {
    pub fn new(root: StateId, graph: &'g Graph) -> Self {
        let state_cnt = graph.len();
        let mut queue = VecDeque::with_capacity(state_cnt);
        let visited = vec![false; state_cnt];

        queue.push_back(root);

        Self {
            visited,
            graph,
            queue,
        }
    }
}

impl<'g> Iterator for BreadthFirstTraversal<'g> {
    type Item = StateId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.queue.pop_front()?;

            // a state may be queued more than once before it is visited.
            if self.visited[current.as_usize()] {
                continue;
            }

            self.visited[current.as_usize()] = true;
            for successor in self.graph.successors(current) {
                if !self.visited[successor.as_usize()] {
                    self.queue.push_back(successor);
                }
            }

            return Some(current);
        }
    }
}

/// Provides depth-first traversal over a graph, following the primary edge
/// of every state before its alt edge.
pub struct DepthFirstTraversal<'g> {
    visited: Vec<bool>,
    graph: &'g Graph,
    stack: Vec<StateId>,
}

impl<'g> DepthFirstTraversal<'g> {
    pub fn new(root: StateId, graph: &'g Graph) -> Self {
        let state_cnt = graph.len();
        let mut stack = Vec::with_capacity(state_cnt);
        let visited = vec![false; state_cnt];

        stack.push(root);

        Self {
            visited,
            graph,
            stack,
        }
    }
}

impl<'g> Iterator for DepthFirstTraversal<'g> {
    type Item = StateId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.stack.pop()?;

            if self.visited[current.as_usize()] {
                continue;
            }

            self.visited[current.as_usize()] = true;
            let state = &self.graph[current];

            // pushed in reverse so that the primary edge is popped first.
            if let Some(alt) = state.alt().filter(|alt| !self.visited[alt.as_usize()]) {
                self.stack.push(alt);
            }
            if let Some(primary) = state
                .primary()
                .filter(|primary| !self.visited[primary.as_usize()])
            {
                self.stack.push(primary);
            }

            return Some(current);
        }
    }
}
