//! Character sets carried as the payload of `Class` states.

use std::fmt::Display;
use std::ops::RangeInclusive;

/// Represents a type that can be tested for membership of a character.
pub trait CharacterRangeSetVerifiable {
    fn in_set(&self, value: char) -> bool;

    fn not_in_set(&self, value: char) -> bool {
        !self.in_set(value)
    }
}

impl CharacterRangeSetVerifiable for RangeInclusive<char> {
    fn in_set(&self, value: char) -> bool {
        self.contains(&value)
    }
}

impl CharacterRangeSetVerifiable for char {
    fn in_set(&self, value: char) -> bool {
        *self == value
    }
}

impl<CRSV: CharacterRangeSetVerifiable> CharacterRangeSetVerifiable for Vec<CRSV> {
    fn in_set(&self, value: char) -> bool {
        self.iter().any(|r| r.in_set(value))
    }
}

/// A set of characters matched by a single `Class` state, associating a
/// set's membership to a character alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    membership: SetMembership,
    set: CharacterAlphabet,
}

impl CharacterSet {
    pub fn inclusive(set: CharacterAlphabet) -> Self {
        Self {
            membership: SetMembership::Inclusive,
            set,
        }
    }

    pub fn exclusive(set: CharacterAlphabet) -> Self {
        Self {
            membership: SetMembership::Exclusive,
            set,
        }
    }

    pub fn invert_membership(self) -> Self {
        let Self { membership, set } = self;

        Self {
            membership: match membership {
                SetMembership::Inclusive => SetMembership::Exclusive,
                SetMembership::Exclusive => SetMembership::Inclusive,
            },
            set,
        }
    }

    pub fn membership(&self) -> &SetMembership {
        &self.membership
    }

    pub fn alphabet(&self) -> &CharacterAlphabet {
        &self.set
    }

    /// Returns true if `value` is matched by this set.
    pub fn contains(&self, value: char) -> bool {
        self.in_set(value)
    }
}

impl CharacterRangeSetVerifiable for CharacterSet {
    fn in_set(&self, value: char) -> bool {
        match &self.membership {
            SetMembership::Inclusive => self.set.in_set(value),
            SetMembership::Exclusive => self.set.not_in_set(value),
        }
    }
}

impl Display for CharacterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let negation = match self.membership {
            SetMembership::Inclusive => "",
            SetMembership::Exclusive => "^",
        };

        write!(f, "[{}{}]", negation, self.set)
    }
}

/// Represents a dispatchable set of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterAlphabet {
    /// Represents a range of values i.e. `0-9`, `a-z`, `A-Z`, etc...
    Range(RangeInclusive<char>),
    /// Represents an explicitly defined set of values. i.e. `[a,b,z]`, `[1,2,7]`
    Explicit(Vec<char>),
    /// Represents a set of range of values i.e. `[0-9a-zA-Z]`,  etc...
    Ranges(Vec<RangeInclusive<char>>),
}

impl CharacterAlphabet {
    /// Joins a group of character sets into a single `Ranges` variant character set.
    pub fn join(sets: Vec<Self>) -> CharacterAlphabet {
        let ranges = sets
            .into_iter()
            .flat_map(|set| match set {
                CharacterAlphabet::Range(r) => vec![r],
                CharacterAlphabet::Ranges(ranges) => ranges,
                CharacterAlphabet::Explicit(explicit_chars) => {
                    explicit_chars.into_iter().map(|c| c..=c).collect()
                }
            })
            .collect();

        CharacterAlphabet::Ranges(ranges)
    }
}

impl CharacterRangeSetVerifiable for CharacterAlphabet {
    fn in_set(&self, value: char) -> bool {
        match self {
            CharacterAlphabet::Range(r) => r.in_set(value),
            CharacterAlphabet::Explicit(v) => v.in_set(value),
            CharacterAlphabet::Ranges(ranges) => ranges.in_set(value),
        }
    }
}

fn fmt_range(f: &mut std::fmt::Formatter<'_>, range: &RangeInclusive<char>) -> std::fmt::Result {
    if range.start() == range.end() {
        write!(f, "{}", range.start().escape_debug())
    } else {
        write!(
            f,
            "{}-{}",
            range.start().escape_debug(),
            range.end().escape_debug()
        )
    }
}

impl Display for CharacterAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacterAlphabet::Range(r) => fmt_range(f, r),
            CharacterAlphabet::Explicit(chars) => chars
                .iter()
                .try_for_each(|c| write!(f, "{}", c.escape_debug())),
            CharacterAlphabet::Ranges(ranges) => ranges.iter().try_for_each(|r| fmt_range(f, r)),
        }
    }
}

/// Denotes whether a given set is inclusive or exclusive to a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetMembership {
    /// States that a set is inclusive of a value, i.e. the value is a member of
    /// the set.
    Inclusive,
    /// States that a set is exclusive of a value, i.e. the value is not a
    /// member of the set.
    Exclusive,
}
