//! Recoverable failures surfaced by [`compile`](crate::compile).

/// Describes why a pattern could not be reduced to a single graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("pattern is empty")]
    EmptyPattern,
    #[error("group is empty")]
    EmptyGroup,
    #[error("quantifier {0:?} has no operand")]
    MissingQuantifierOperand(char),
    #[error("alternation has no left operand")]
    MissingAlternationLeftOperand,
    #[error("alternation has no right operand")]
    MissingAlternationRightOperand,
    #[error("group is never closed")]
    UnclosedGroup,
    #[error("closing paren has no matching open group")]
    UnopenedGroup,
    #[error("lazy quantifier {0:?} is not supported")]
    LazyQuantifier(char),
    #[error("{0:?} is not supported")]
    Unsupported(char),
    #[error("escape sequence \\{0} is not supported")]
    UnsupportedEscape(char),
    #[error("pattern ends with an incomplete escape sequence")]
    TrailingEscape,
    #[error("operand stack underflow")]
    OperandStackUnderflow,
    #[error("operand stack holds {0} fragments at end of pattern")]
    UnbalancedOperandStack(usize),
}

/// Describes why a bracketed character class is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClassSpecReason {
    #[error("character class is never closed")]
    Unterminated,
    #[error("character class is empty")]
    Empty,
    #[error("range {lower:?}-{upper:?} is out of order")]
    ReversedRange { lower: char, upper: char },
    #[error("escape sequence \\{0} is not supported in a character class")]
    UnsupportedEscape(char),
    #[error("inverted shorthand \\{0} cannot appear in a character class")]
    NegatedShorthand(char),
}

/// An error returned from compiling a pattern. Compilation is deterministic,
/// so a pattern that fails once always fails with the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("malformed pattern at position {position}: {reason}")]
    MalformedPattern {
        position: usize,
        reason: MalformedReason,
    },
    #[error("invalid character class at position {position}: {reason}")]
    InvalidClassSpec {
        position: usize,
        reason: ClassSpecReason,
    },
    #[error("pattern of {len} characters exceeds the limit of {limit}")]
    PatternTooLarge { len: usize, limit: usize },
    #[error("undefined parse error: {0}")]
    Parser(String),
}

impl CompileError {
    pub(crate) fn malformed(position: usize, reason: MalformedReason) -> Self {
        Self::MalformedPattern { position, reason }
    }

    pub(crate) fn invalid_class(position: usize, reason: ClassSpecReason) -> Self {
        Self::InvalidClassSpec { position, reason }
    }

    /// Returns true for the `MalformedPattern` variant.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPattern { .. })
    }

    /// The character index the error was reported at, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::MalformedPattern { position, .. } | Self::InvalidClassSpec { position, .. } => {
                Some(*position)
            }
            Self::PatternTooLarge { .. } | Self::Parser(_) => None,
        }
    }
}
