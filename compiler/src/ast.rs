//! Syntax items recognized by the lexer. Only the pieces of a pattern that
//! carry structure beyond a single character are represented here.

// Groups

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// `(...)`, bracketed by `Capture` states when captures are enabled.
    Capturing,
    /// `(?:...)`
    NonCapturing,
}

pub struct GroupNonCapturingModifier;

// Matchers

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchCharacterClass {
    CharacterGroup(CharacterGroup),
    CharacterClass(CharacterClass),
}

impl From<CharacterGroup> for MatchCharacterClass {
    fn from(src: CharacterGroup) -> Self {
        Self::CharacterGroup(src)
    }
}

impl From<CharacterClass> for MatchCharacterClass {
    fn from(src: CharacterClass) -> Self {
        Self::CharacterClass(src)
    }
}

// Character Classes

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterGroup {
    NegatedItems(Vec<CharacterGroupItem>),
    Items(Vec<CharacterGroupItem>),
}

pub struct CharacterGroupNegativeModifier;

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterGroupItem {
    CharacterClass(CharacterClass),
    CharacterRange(Char, Char),
    Char(Char),
}

impl From<CharacterClass> for CharacterGroupItem {
    fn from(src: CharacterClass) -> Self {
        Self::CharacterClass(src)
    }
}

impl From<CharacterRange> for CharacterGroupItem {
    fn from(src: CharacterRange) -> Self {
        let CharacterRange {
            lower_bound,
            upper_bound,
        } = src;

        Self::CharacterRange(lower_bound, upper_bound)
    }
}

impl From<Char> for CharacterGroupItem {
    fn from(src: Char) -> Self {
        Self::Char(src)
    }
}

/// Shorthand classes, i.e. `\w`, `\d` and `\s` and their inversions.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    AnyWord,
    AnyWordInverted,
    AnyDecimalDigit,
    AnyDecimalDigitInverted,
    AnyWhitespace,
    AnyWhitespaceInverted,
}

impl CharacterClass {
    /// Returns the character following the `\` that denotes this class.
    pub fn as_shorthand(&self) -> char {
        match self {
            CharacterClass::AnyWord => 'w',
            CharacterClass::AnyWordInverted => 'W',
            CharacterClass::AnyDecimalDigit => 'd',
            CharacterClass::AnyDecimalDigitInverted => 'D',
            CharacterClass::AnyWhitespace => 's',
            CharacterClass::AnyWhitespaceInverted => 'S',
        }
    }

    /// Returns the class denoted by `\c`, if any.
    pub fn from_shorthand(c: char) -> Option<Self> {
        match c {
            'w' => Some(CharacterClass::AnyWord),
            'W' => Some(CharacterClass::AnyWordInverted),
            'd' => Some(CharacterClass::AnyDecimalDigit),
            'D' => Some(CharacterClass::AnyDecimalDigitInverted),
            's' => Some(CharacterClass::AnyWhitespace),
            'S' => Some(CharacterClass::AnyWhitespaceInverted),
            _ => None,
        }
    }

    pub fn is_inverted(&self) -> bool {
        matches!(
            self,
            CharacterClass::AnyWordInverted
                | CharacterClass::AnyDecimalDigitInverted
                | CharacterClass::AnyWhitespaceInverted
        )
    }
}

pub struct CharacterRange {
    lower_bound: Char,
    upper_bound: Char,
}

impl CharacterRange {
    pub fn new(lower_bound: Char, upper_bound: Char) -> Self {
        Self {
            lower_bound,
            upper_bound,
        }
    }
}

// Quantifiers

/// Represents all supported quantifier types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Represents a quantifier representing a match of zero or more of the
    /// preceeding field. Represented by the `*` quantifier.
    ZeroOrMore,
    /// Represents a quantifier representing a match of one or more of the
    /// preceeding field. Represented by the `+` quantifier.
    OneOrMore,
    /// Represents an optional quantifier representing a match of zero or one
    /// field. Represented by the `?` quantifier.
    ZeroOrOne,
}

impl Quantifier {
    pub fn as_char(&self) -> char {
        match self {
            Quantifier::ZeroOrMore => '*',
            Quantifier::OneOrMore => '+',
            Quantifier::ZeroOrOne => '?',
        }
    }
}

// Terminals

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Char(pub char);

impl Char {
    pub fn as_char(&self) -> char {
        self.0
    }
}

impl From<Char> for char {
    fn from(src: Char) -> char {
        src.as_char()
    }
}
