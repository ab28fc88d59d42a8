//! Compiles a regular expression pattern into an [`nfa_graph::Graph`] using
//! Thompson's construction.
//!
//! # Example
//!
//! ```rust
//! use nfa_compiler::compile;
//! use nfa_compiler::nfa_graph::{OpCode, Payload};
//!
//! // A pattern is compiled in a single call into an immutable graph.
//! let graph = compile("ab|c").expect("pattern is well formed");
//!
//! // The entry of an alternation is a split, preferring its left branch.
//! let entry = graph.entry();
//! assert_eq!(OpCode::Split, entry.opcode());
//!
//! let preferred = entry.primary().expect("split has a primary edge");
//! assert_eq!(&Payload::Rune('a'), graph[preferred].payload());
//!
//! // The rendered graph lists each state in arena order, marking the entry.
//! print!("{}", graph);
//! ```
//!
//! Malformed patterns are rejected with a [`CompileError`] that locates the
//! offending character.
//!
//! ```rust
//! use nfa_compiler::{compile, CompileError, MalformedReason};
//!
//! assert_eq!(
//!     Err(CompileError::MalformedPattern {
//!         position: 0,
//!         reason: MalformedReason::MissingQuantifierOperand('*'),
//!     }),
//!     compile("*a")
//! );
//! ```

pub mod ast;
mod class;
pub mod compiler;
mod error;
mod fragment;
pub mod lexer;
mod options;
mod patch;

pub use compiler::{compile, compile_with_options, Compiler};
pub use error::{ClassSpecReason, CompileError, MalformedReason};
pub use options::{CompileOptions, MAX_PATTERN_LEN};

pub use nfa_graph;
