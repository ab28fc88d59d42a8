/// Tunes how a pattern is lowered into a graph.
///
/// # Example
///
/// ```
/// use nfa_compiler::CompileOptions;
///
/// let options = CompileOptions::default()
///     .with_captures(false)
///     .with_size_limit(256);
///
/// assert!(!options.captures());
/// assert_eq!(Some(256), options.size_limit());
/// ```
/// The longest pattern, in characters, whose graph always fits a 32-bit
/// state index. A token allocates at most two states, plus the final `Match`.
pub const MAX_PATTERN_LEN: usize = (u32::MAX as usize - 1) / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    captures: bool,
    split_to_match: bool,
    size_limit: Option<usize>,
}

impl CompileOptions {
    /// When enabled, capturing groups are bracketed by a pair of `Capture`
    /// states. Otherwise every group passes its sub-graph through unchanged.
    pub fn with_captures(mut self, captures: bool) -> Self {
        self.captures = captures;
        self
    }

    /// When enabled, a `Split` whose alt edge is patched directly to the
    /// `Match` state is emitted as a `SplitToMatch`.
    pub fn with_split_to_match(mut self, split_to_match: bool) -> Self {
        self.split_to_match = split_to_match;
        self
    }

    /// Rejects patterns longer than `limit` characters before any work is
    /// done. Patterns longer than [`MAX_PATTERN_LEN`] are always rejected,
    /// whether or not a limit is set.
    pub fn with_size_limit(mut self, limit: usize) -> Self {
        self.size_limit = Some(limit);
        self
    }

    pub fn captures(&self) -> bool {
        self.captures
    }

    pub fn split_to_match(&self) -> bool {
        self.split_to_match
    }

    pub fn size_limit(&self) -> Option<usize> {
        self.size_limit
    }

    /// The configured limit, capped at [`MAX_PATTERN_LEN`].
    pub fn effective_size_limit(&self) -> usize {
        self.size_limit.map_or(MAX_PATTERN_LEN, |limit| limit.min(MAX_PATTERN_LEN))
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            captures: true,
            split_to_match: false,
            size_limit: None,
        }
    }
}
