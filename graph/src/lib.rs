//! The instruction graph produced by `nfa-compiler`.
//!
//! A [`Graph`] is a non-deterministic finite automaton stored as an arena of
//! [`State`] nodes. Each state carries an [`OpCode`], an optional payload and
//! up to two outgoing edges. Execution engines begin at [`Graph::entry`] and
//! only ever read the graph; nothing in this crate mutates a built graph.
//!
//! # Example
//!
//! ```
//! use nfa_graph::*;
//!
//! // hand-assembled graph for the pattern `a`.
//! let mut builder = GraphBuilder::default();
//! let rune = builder.insert_state_mut(State::rune('a'));
//! let accept = builder.insert_state_mut(State::r#match());
//! builder.patch_edge_mut(rune, Edge::Primary, accept);
//!
//! let graph = builder.build(rune);
//!
//! assert_eq!(2, graph.len());
//! assert_eq!(OpCode::Rune, graph.entry().opcode());
//! assert_eq!(Some(accept), graph.entry().primary());
//! assert_eq!(Some(accept), graph.match_state());
//! ```

use std::fmt::Display;

mod class;
mod traversal;

pub use class::{CharacterAlphabet, CharacterRangeSetVerifiable, CharacterSet, SetMembership};
pub use traversal::{BreadthFirstTraversal, DepthFirstTraversal, Successors};

/// An index into a graph's state arena.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for StateId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Selects one of the two successor fields of a [`State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The edge followed first. Every non-terminal state has one.
    Primary,
    /// The second branch of a `Split` or `SplitToMatch`.
    Alt,
}

/// The kind of a graph node and its branching semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// An uninitialized node. Never present in a graph returned by the
    /// compiler.
    Fail,
    /// Consumes exactly the code point held in the payload.
    Rune,
    /// Consumes one code point that is a member of the payload set.
    Class,
    /// Consumes any single code point.
    Any,
    /// Marks a sub-match boundary without consuming input.
    Capture,
    /// An epsilon branch. The primary edge has priority over the alt edge.
    Split,
    /// A `Split` whose alt edge leads directly to the `Match` state.
    SplitToMatch,
    /// Terminal acceptance. Has no outgoing edges.
    Match,
}

impl OpCode {
    /// Returns true for opcodes that may populate an alt edge.
    pub fn is_branching(self) -> bool {
        matches!(self, OpCode::Split | OpCode::SplitToMatch)
    }

    /// Returns true for opcodes that consume a code point of input.
    pub fn is_consuming(self) -> bool {
        matches!(self, OpCode::Rune | OpCode::Class | OpCode::Any)
    }

    /// Returns true for opcodes that have no outgoing edges.
    pub fn is_terminal(self) -> bool {
        matches!(self, OpCode::Match | OpCode::Fail)
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            OpCode::Fail => "Fail",
            OpCode::Rune => "Rune",
            OpCode::Class => "Class",
            OpCode::Any => "Any",
            OpCode::Capture => "Capture",
            OpCode::Split => "Split",
            OpCode::SplitToMatch => "SplitToMatch",
            OpCode::Match => "Match",
        };

        write!(f, "{}", repr)
    }
}

/// Marks which side of a capturing group a `Capture` state sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureBoundary {
    /// Entered before the group's sub-graph.
    Start(usize),
    /// Entered after the group's sub-graph.
    End(usize),
}

impl CaptureBoundary {
    /// The zero-based index of the group, in order of its opening paren.
    pub fn group(&self) -> usize {
        match self {
            CaptureBoundary::Start(group) | CaptureBoundary::End(group) => *group,
        }
    }
}

impl Display for CaptureBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureBoundary::Start(group) => write!(f, "Start[{:04}]", group),
            CaptureBoundary::End(group) => write!(f, "End[{:04}]", group),
        }
    }
}

/// Opcode specific data held by a state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    Rune(char),
    Class(CharacterSet),
    Capture(CaptureBoundary),
}

/// A single node of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    opcode: OpCode,
    primary: Option<StateId>,
    alt: Option<StateId>,
    payload: Payload,
}

impl State {
    /// Constructs a state from its constituent parts.
    ///
    /// # Panics
    ///
    /// Panics if `alt` is provided for a non-branching opcode.
    #[must_use]
    pub fn new(
        opcode: OpCode,
        primary: Option<StateId>,
        alt: Option<StateId>,
        payload: Payload,
    ) -> Self {
        assert!(
            alt.is_none() || opcode.is_branching(),
            "alt edge set on non-branching opcode {}",
            opcode
        );

        Self {
            opcode,
            primary,
            alt,
            payload,
        }
    }

    pub fn rune(value: char) -> Self {
        Self::new(OpCode::Rune, None, None, Payload::Rune(value))
    }

    pub fn class(set: CharacterSet) -> Self {
        Self::new(OpCode::Class, None, None, Payload::Class(set))
    }

    pub fn any() -> Self {
        Self::new(OpCode::Any, None, None, Payload::None)
    }

    pub fn capture(boundary: CaptureBoundary) -> Self {
        Self::new(OpCode::Capture, None, None, Payload::Capture(boundary))
    }

    /// A split whose primary edge is already known.
    pub fn split(primary: StateId) -> Self {
        Self::new(OpCode::Split, Some(primary), None, Payload::None)
    }

    pub fn r#match() -> Self {
        Self::new(OpCode::Match, None, None, Payload::None)
    }

    pub fn opcode(&self) -> OpCode {
        self.opcode
    }

    pub fn primary(&self) -> Option<StateId> {
        self.primary
    }

    pub fn alt(&self) -> Option<StateId> {
        self.alt
    }

    pub fn edge(&self, edge: Edge) -> Option<StateId> {
        match edge {
            Edge::Primary => self.primary,
            Edge::Alt => self.alt,
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the populated successors in priority order, primary first.
    pub fn successors(&self) -> impl Iterator<Item = StateId> {
        self.primary.into_iter().chain(self.alt)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.payload {
            Payload::None => write!(f, "{}", self.opcode)?,
            Payload::Rune(c) => write!(f, "{} {:?}", self.opcode, c)?,
            Payload::Class(set) => write!(f, "{} {}", self.opcode, set)?,
            Payload::Capture(boundary) => write!(f, "{} {}", self.opcode, boundary)?,
        }

        match (self.primary, self.alt) {
            (Some(primary), Some(alt)) => write!(f, " ({}), ({})", primary, alt),
            (Some(primary), None) => write!(f, " -> ({})", primary),
            (None, Some(alt)) => write!(f, " -> (----), ({})", alt),
            (None, None) => Ok(()),
        }
    }
}

/// Accumulates states during compilation and patches their edges. The arena
/// becomes the backing store of the [`Graph`] returned by [`build`].
///
/// [`build`]: GraphBuilder::build
#[derive(Debug, Default)]
pub struct GraphBuilder {
    states: Vec<State>,
}

impl GraphBuilder {
    /// Instantiates a builder with capacity for `capacity` states.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(id.as_usize())
    }

    /// Inserts a state into the arena, returning its index.
    pub fn insert_state_mut(&mut self, state: State) -> StateId {
        let next_idx = u32::try_from(self.states.len())
            .map(StateId::from)
            .expect("state arena overflows a 32-bit index");
        self.states.push(state);

        next_idx
    }

    /// Points the `edge` of `source` at `target`.
    ///
    /// # Panics
    ///
    /// Each edge may be patched exactly once. Panics if the edge already has
    /// a target, if `Alt` is patched on a non-branching state, or if either
    /// index is outside the arena.
    pub fn patch_edge_mut(&mut self, source: StateId, edge: Edge, target: StateId) {
        assert!(
            target.as_usize() < self.states.len(),
            "patch target ({}) is not in the arena",
            target
        );

        let state = &mut self.states[source.as_usize()];
        let slot = match edge {
            Edge::Primary => &mut state.primary,
            Edge::Alt => {
                assert!(
                    state.opcode.is_branching(),
                    "alt edge patched on non-branching state ({}) {}",
                    source,
                    state.opcode
                );
                &mut state.alt
            }
        };

        assert!(
            slot.is_none(),
            "edge {:?} of state ({}) patched twice",
            edge,
            source
        );
        *slot = Some(target);
    }

    /// Converts a `Split` into a `SplitToMatch`.
    ///
    /// # Panics
    ///
    /// Panics if the state is not a `Split`.
    pub fn promote_to_split_to_match(&mut self, id: StateId) {
        let state = &mut self.states[id.as_usize()];
        assert_eq!(
            OpCode::Split,
            state.opcode,
            "only a split state ({}) can be promoted",
            id
        );

        state.opcode = OpCode::SplitToMatch;
    }

    /// Finalizes the arena into an immutable graph rooted at `entry`.
    pub fn build(self, entry: StateId) -> Graph {
        assert!(
            entry.as_usize() < self.states.len(),
            "entry ({}) is not in the arena",
            entry
        );

        Graph::new(self.states, entry)
    }
}

/// A fully connected, immutable instruction graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    states: Vec<State>,
    entry: StateId,
}

impl Graph {
    fn new(states: Vec<State>, entry: StateId) -> Self {
        Self { states, entry }
    }

    /// The state an execution engine begins simulation from.
    pub fn entry(&self) -> &State {
        &self[self.entry]
    }

    pub fn entry_id(&self) -> StateId {
        self.entry
    }

    /// Returns the number of states in the graph.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Borrows a state by its index if it exists in the graph.
    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(id.as_usize())
    }

    /// Returns every state paired with its index, in arena order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, state)| (StateId(idx as u32), state))
    }

    /// Returns all direct successors of a state, primary edge first.
    pub fn successors(&self, source: StateId) -> Successors<'_> {
        Successors::new(&self[source])
    }

    /// A helper method for returning a `DepthFirstTraversal` from the entry
    /// of a graph.
    pub fn depth_first_traversal(&self) -> DepthFirstTraversal<'_> {
        DepthFirstTraversal::new(self.entry, self)
    }

    /// A helper method for returning a `BreadthFirstTraversal` from the entry
    /// of a graph.
    pub fn breadth_first_traversal(&self) -> BreadthFirstTraversal<'_> {
        BreadthFirstTraversal::new(self.entry, self)
    }

    /// Returns the first `Match` state reachable from the entry.
    pub fn match_state(&self) -> Option<StateId> {
        self.depth_first_traversal()
            .find(|&id| self[id].opcode() == OpCode::Match)
    }
}

impl std::ops::Index<StateId> for Graph {
    type Output = State;

    fn index(&self, index: StateId) -> &Self::Output {
        &self.states[index.as_usize()]
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (id, state) in self.states() {
            let marker = if id == self.entry { "*" } else { " " };
            writeln!(f, "{}{}: {}", marker, id, state)?
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn graph_should_be_shareable_across_threads() {
        assert_send_sync::<Graph>();
    }

    #[test]
    fn should_patch_each_edge_once() {
        let mut builder = GraphBuilder::default();
        let rune = builder.insert_state_mut(State::rune('a'));
        let split = builder.insert_state_mut(State::split(rune));
        let accept = builder.insert_state_mut(State::r#match());

        builder.patch_edge_mut(rune, Edge::Primary, split);
        builder.patch_edge_mut(split, Edge::Alt, accept);

        let graph = builder.build(split);

        assert_eq!(Some(rune), graph.entry().primary());
        assert_eq!(Some(accept), graph.entry().alt());
        assert_eq!(Some(split), graph[rune].primary());
        assert_eq!(None, graph[accept].primary());
    }

    #[test]
    #[should_panic(expected = "patched twice")]
    fn should_panic_when_an_edge_is_patched_twice() {
        let mut builder = GraphBuilder::default();
        let rune = builder.insert_state_mut(State::rune('a'));
        let accept = builder.insert_state_mut(State::r#match());

        builder.patch_edge_mut(rune, Edge::Primary, accept);
        builder.patch_edge_mut(rune, Edge::Primary, accept);
    }

    #[test]
    #[should_panic(expected = "non-branching")]
    fn should_panic_when_alt_is_patched_on_a_non_branching_state() {
        let mut builder = GraphBuilder::default();
        let rune = builder.insert_state_mut(State::rune('a'));
        let accept = builder.insert_state_mut(State::r#match());

        builder.patch_edge_mut(rune, Edge::Alt, accept);
    }

    #[test]
    #[should_panic(expected = "non-branching")]
    fn should_refuse_alt_edge_on_construction_of_non_branching_state() {
        let _ = State::new(
            OpCode::Any,
            Some(StateId::from(0)),
            Some(StateId::from(1)),
            Payload::None,
        );
    }

    #[test]
    fn should_promote_split_to_split_to_match() {
        let mut builder = GraphBuilder::default();
        let rune = builder.insert_state_mut(State::rune('a'));
        let split = builder.insert_state_mut(State::split(rune));
        let accept = builder.insert_state_mut(State::r#match());
        builder.patch_edge_mut(rune, Edge::Primary, accept);
        builder.patch_edge_mut(split, Edge::Alt, accept);
        builder.promote_to_split_to_match(split);

        let graph = builder.build(split);
        assert_eq!(OpCode::SplitToMatch, graph.entry().opcode());
        assert!(graph.entry().opcode().is_branching());
    }

    #[test]
    fn should_classify_opcodes() {
        let input_output = [
            (OpCode::Fail, (false, false, true)),
            (OpCode::Rune, (false, true, false)),
            (OpCode::Class, (false, true, false)),
            (OpCode::Any, (false, true, false)),
            (OpCode::Capture, (false, false, false)),
            (OpCode::Split, (true, false, false)),
            (OpCode::SplitToMatch, (true, false, false)),
            (OpCode::Match, (false, false, true)),
        ];

        for (opcode, expected) in input_output {
            assert_eq!(
                (opcode, expected),
                (
                    opcode,
                    (
                        opcode.is_branching(),
                        opcode.is_consuming(),
                        opcode.is_terminal()
                    )
                )
            );
        }
    }

    #[test]
    fn should_render_graph_one_state_per_line() {
        let mut builder = GraphBuilder::default();
        let rune = builder.insert_state_mut(State::rune('a'));
        let split = builder.insert_state_mut(State::split(rune));
        let accept = builder.insert_state_mut(State::r#match());
        builder.patch_edge_mut(rune, Edge::Primary, split);
        builder.patch_edge_mut(split, Edge::Alt, accept);

        let graph = builder.build(split);

        assert_eq!(
            " 0000: Rune 'a' -> (0001)
*0001: Split (0000), (0002)
 0002: Match
",
            graph.to_string()
        );
    }
}
