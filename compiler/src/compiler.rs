//! Lowers a token stream into an instruction graph with Thompson's
//! construction.
//!
//! Each token applies one transformation to an operand stack of
//! [`Fragment`]s. Concatenation is implicit, so the compiler tracks how many
//! operands the current group level holds (`atoms`) and where its pending
//! alternations were seen (`alternates`). Opening a group saves both on a
//! frame stack; closing it folds the level down to a single fragment.

use nfa_graph::{CaptureBoundary, Edge, Graph, GraphBuilder, State, StateId};

use super::ast;
use super::class;
use super::error::{CompileError, MalformedReason};
use super::fragment::Fragment;
use super::lexer::{self, Spanned, Token};
use super::options::CompileOptions;
use super::patch::{EdgeList, Slot};

/// Compiles a pattern with the default [`CompileOptions`].
///
/// # Example
///
/// ```
/// use nfa_compiler::compile;
/// use nfa_compiler::nfa_graph::OpCode;
///
/// let graph = compile("a*").unwrap();
///
/// assert_eq!(3, graph.len());
/// assert_eq!(OpCode::Split, graph.entry().opcode());
/// ```
pub fn compile(pattern: &str) -> Result<Graph, CompileError> {
    Compiler::default().compile(pattern)
}

/// Compiles a pattern with the supplied options.
pub fn compile_with_options(pattern: &str, options: CompileOptions) -> Result<Graph, CompileError> {
    Compiler::new(options).compile(pattern)
}

#[derive(Debug, Default)]
struct OperandStack(Vec<Fragment>);

impl OperandStack {
    fn push(&mut self, fragment: Fragment) {
        self.0.push(fragment)
    }

    fn pop(&mut self, position: usize) -> Result<Fragment, CompileError> {
        self.0.pop().ok_or_else(|| {
            CompileError::malformed(position, MalformedReason::OperandStackUnderflow)
        })
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// The enclosing level saved while a group is being compiled.
#[derive(Debug)]
struct GroupFrame {
    atoms: usize,
    alternates: Vec<usize>,
    capture: Option<usize>,
    position: usize,
}

/// Single-use state for one compilation.
#[derive(Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
    builder: GraphBuilder,
    operands: OperandStack,
    frames: Vec<GroupFrame>,
    atoms: usize,
    alternates: Vec<usize>,
    next_capture: usize,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Compiles `pattern`, consuming the compiler.
    pub fn compile(mut self, pattern: &str) -> Result<Graph, CompileError> {
        let len = pattern.chars().count();
        let limit = self.options.effective_size_limit();
        if len > limit {
            return Err(CompileError::PatternTooLarge { len, limit });
        }

        let tokens = lexer::tokenize(pattern)?;
        self.builder = GraphBuilder::with_capacity(tokens.len() * 2 + 1);

        for Spanned { position, token } in tokens {
            self.scan(position, token)?;
        }

        self.finalize(len)
    }

    fn scan(&mut self, position: usize, token: Token) -> Result<(), CompileError> {
        match token {
            Token::Rune(c) => self.push_atom(position, State::rune(c)),
            Token::Any => self.push_atom(position, State::any()),
            Token::Class(cc) => {
                let set = class::to_character_set(position, cc)?;
                self.push_atom(position, State::class(set))
            }
            Token::Quantifier(quantifier) => self.quantify(position, quantifier),
            Token::Alternation => self.alternate(position),
            Token::GroupOpen(kind) => self.open_group(position, kind),
            Token::GroupClose => self.close_group(position),
        }
    }

    fn finalize(mut self, position: usize) -> Result<Graph, CompileError> {
        if let Some(frame) = self.frames.last() {
            return Err(CompileError::malformed(
                frame.position,
                MalformedReason::UnclosedGroup,
            ));
        }

        self.collapse_level(
            position,
            CompileError::malformed(0, MalformedReason::EmptyPattern),
        )?;

        let remaining = self.operands.len();
        if remaining != 1 {
            return Err(CompileError::malformed(
                position,
                MalformedReason::UnbalancedOperandStack(remaining),
            ));
        }

        let Fragment { entry, dangling } = self.operands.pop(position)?;
        let accept = self.builder.insert_state_mut(State::r#match());

        let promotable: Vec<StateId> = if self.options.split_to_match() {
            dangling
                .iter()
                .filter(|slot| slot.edge == Edge::Alt)
                .map(|slot| slot.state)
                .collect()
        } else {
            vec![]
        };

        dangling.patch(&mut self.builder, accept);
        for split in promotable {
            self.builder.promote_to_split_to_match(split);
        }

        Ok(self.builder.build(entry))
    }

    fn push_atom(&mut self, position: usize, state: State) -> Result<(), CompileError> {
        self.concatenate_pending(position)?;

        let id = self.builder.insert_state_mut(state);
        self.operands
            .push(Fragment::new(id, EdgeList::singleton(Slot::primary(id))));
        self.atoms += 1;

        Ok(())
    }

    /// Joins the two atoms already on the level so that an incoming atom
    /// always lands next to a single predecessor.
    fn concatenate_pending(&mut self, position: usize) -> Result<(), CompileError> {
        if self.atoms > 1 {
            self.concatenate(position)?;
            self.atoms -= 1;
        }

        Ok(())
    }

    fn collapse_atoms(&mut self, position: usize) -> Result<(), CompileError> {
        while self.atoms > 1 {
            self.concatenate(position)?;
            self.atoms -= 1;
        }

        Ok(())
    }

    /// Reduces the current level to one fragment. `empty` is reported if the
    /// level holds nothing at all.
    fn collapse_level(&mut self, position: usize, empty: CompileError) -> Result<(), CompileError> {
        if self.atoms == 0 {
            return Err(match self.alternates.last() {
                Some(&bar) => {
                    CompileError::malformed(bar, MalformedReason::MissingAlternationRightOperand)
                }
                None => empty,
            });
        }

        self.collapse_atoms(position)?;

        // innermost first, leaving the leftmost alternative on the outer split.
        let alternates = std::mem::take(&mut self.alternates);
        for bar in alternates.into_iter().rev() {
            self.alternation(bar)?;
        }
        self.atoms = 1;

        Ok(())
    }

    fn quantify(
        &mut self,
        position: usize,
        quantifier: ast::Quantifier,
    ) -> Result<(), CompileError> {
        if self.atoms == 0 {
            return Err(CompileError::malformed(
                position,
                MalformedReason::MissingQuantifierOperand(quantifier.as_char()),
            ));
        }

        let Fragment { entry, dangling } = self.operands.pop(position)?;
        let split = self.builder.insert_state_mut(State::split(entry));
        let skip = EdgeList::singleton(Slot::alt(split));

        let fragment = match quantifier {
            ast::Quantifier::ZeroOrOne => Fragment::new(split, dangling.append(skip)),
            ast::Quantifier::ZeroOrMore => {
                dangling.patch(&mut self.builder, split);
                Fragment::new(split, skip)
            }
            ast::Quantifier::OneOrMore => {
                dangling.patch(&mut self.builder, split);
                Fragment::new(entry, skip)
            }
        };

        self.operands.push(fragment);
        Ok(())
    }

    fn alternate(&mut self, position: usize) -> Result<(), CompileError> {
        if self.atoms == 0 {
            return Err(match self.alternates.last() {
                Some(&bar) => {
                    CompileError::malformed(bar, MalformedReason::MissingAlternationRightOperand)
                }
                None => CompileError::malformed(
                    position,
                    MalformedReason::MissingAlternationLeftOperand,
                ),
            });
        }

        self.collapse_atoms(position)?;
        self.atoms = 0;
        self.alternates.push(position);

        Ok(())
    }

    fn open_group(&mut self, position: usize, kind: ast::GroupKind) -> Result<(), CompileError> {
        self.concatenate_pending(position)?;

        let capture = match kind {
            ast::GroupKind::Capturing if self.options.captures() => {
                let group = self.next_capture;
                self.next_capture += 1;
                Some(group)
            }
            ast::GroupKind::Capturing | ast::GroupKind::NonCapturing => None,
        };

        self.frames.push(GroupFrame {
            atoms: self.atoms,
            alternates: std::mem::take(&mut self.alternates),
            capture,
            position,
        });
        self.atoms = 0;

        Ok(())
    }

    fn close_group(&mut self, position: usize) -> Result<(), CompileError> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| CompileError::malformed(position, MalformedReason::UnopenedGroup))?;

        self.collapse_level(
            position,
            CompileError::malformed(frame.position, MalformedReason::EmptyGroup),
        )?;

        if let Some(group) = frame.capture {
            self.capture(position, group)?;
        }

        self.atoms = frame.atoms + 1;
        self.alternates = frame.alternates;

        Ok(())
    }

    /// Pops two fragments and joins the first onto the second.
    fn concatenate(&mut self, position: usize) -> Result<(), CompileError> {
        let e2 = self.operands.pop(position)?;
        let e1 = self.operands.pop(position)?;

        e1.dangling.patch(&mut self.builder, e2.entry);
        self.operands.push(Fragment::new(e1.entry, e2.dangling));

        Ok(())
    }

    /// Pops two fragments and branches between them, preferring the first.
    fn alternation(&mut self, position: usize) -> Result<(), CompileError> {
        let e2 = self.operands.pop(position)?;
        let e1 = self.operands.pop(position)?;

        let split = self.builder.insert_state_mut(State::split(e1.entry));
        self.builder.patch_edge_mut(split, Edge::Alt, e2.entry);
        self.operands
            .push(Fragment::new(split, e1.dangling.append(e2.dangling)));

        Ok(())
    }

    fn capture(&mut self, position: usize, group: usize) -> Result<(), CompileError> {
        let Fragment { entry, dangling } = self.operands.pop(position)?;

        let start = self
            .builder
            .insert_state_mut(State::capture(CaptureBoundary::Start(group)));
        self.builder.patch_edge_mut(start, Edge::Primary, entry);

        let end = self
            .builder
            .insert_state_mut(State::capture(CaptureBoundary::End(group)));
        dangling.patch(&mut self.builder, end);

        self.operands
            .push(Fragment::new(start, EdgeList::singleton(Slot::primary(end))));
        Ok(())
    }
}
