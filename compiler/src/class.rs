//! Lowers character class syntax into the sets carried by `Class` states.

use nfa_graph::{CharacterAlphabet, CharacterSet};

use super::ast;
use super::error::{ClassSpecReason, CompileError};

/// Converts a shorthand class or bracket group starting at `position` into a
/// single character set.
pub fn to_character_set(
    position: usize,
    class: ast::MatchCharacterClass,
) -> Result<CharacterSet, CompileError> {
    match class {
        ast::MatchCharacterClass::CharacterClass(cc) => Ok(character_class_to_set(cc)),
        ast::MatchCharacterClass::CharacterGroup(cg) => character_group_to_set(cg)
            .map_err(|reason| CompileError::invalid_class(position, reason)),
    }
}

fn character_group_to_set(cg: ast::CharacterGroup) -> Result<CharacterSet, ClassSpecReason> {
    let (negated, items) = match cg {
        ast::CharacterGroup::NegatedItems(cgis) => (true, cgis),
        ast::CharacterGroup::Items(cgis) => (false, cgis),
    };

    if items.is_empty() {
        return Err(ClassSpecReason::Empty);
    }

    let item_cnt = items.len();
    let alphabets = items
        .into_iter()
        .map(character_group_item_to_alphabet)
        .collect::<Result<Vec<_>, _>>()?;

    // fold all explicit character alphabets into a single alphabet.
    let (explicit, mut other_alphabets) = alphabets.into_iter().fold(
        (Vec::with_capacity(item_cnt), Vec::with_capacity(item_cnt)),
        |(mut chars, mut other), x| {
            match x {
                CharacterAlphabet::Explicit(mut c) => chars.append(&mut c),
                ca @ CharacterAlphabet::Range(_) | ca @ CharacterAlphabet::Ranges(_) => {
                    other.push(ca)
                }
            };

            (chars, other)
        },
    );

    let alphabet = match (explicit.is_empty(), other_alphabets.len()) {
        (false, 0) => CharacterAlphabet::Explicit(explicit),
        (true, 1) => other_alphabets.remove(0),
        (true, _) => CharacterAlphabet::join(other_alphabets),
        (false, _) => CharacterAlphabet::join(
            std::iter::once(CharacterAlphabet::Explicit(explicit))
                .chain(other_alphabets)
                .collect(),
        ),
    };

    let set = if negated {
        CharacterSet::exclusive(alphabet)
    } else {
        CharacterSet::inclusive(alphabet)
    };

    Ok(set)
}

fn character_group_item_to_alphabet(
    cgi: ast::CharacterGroupItem,
) -> Result<CharacterAlphabet, ClassSpecReason> {
    use ast::Char;

    match cgi {
        // an inverted class has no alphabet that can be merged with its
        // neighbours.
        ast::CharacterGroupItem::CharacterClass(cc) if cc.is_inverted() => {
            Err(ClassSpecReason::NegatedShorthand(cc.as_shorthand()))
        }
        ast::CharacterGroupItem::CharacterClass(cc) => {
            Ok(character_class_to_set(cc).alphabet().clone())
        }
        ast::CharacterGroupItem::CharacterRange(Char(lower), Char(upper)) if lower > upper => {
            Err(ClassSpecReason::ReversedRange { lower, upper })
        }
        ast::CharacterGroupItem::CharacterRange(Char(lower), Char(upper)) => {
            Ok(CharacterAlphabet::Range(lower..=upper))
        }
        ast::CharacterGroupItem::Char(Char(c)) => Ok(CharacterAlphabet::Explicit(vec![c])),
    }
}

fn character_class_to_set(cc: ast::CharacterClass) -> CharacterSet {
    match cc {
        ast::CharacterClass::AnyWord => AnyWordClass.into(),
        ast::CharacterClass::AnyWordInverted => AnyWordClassInverted.into(),
        ast::CharacterClass::AnyDecimalDigit => AnyDecimalDigitClass.into(),
        ast::CharacterClass::AnyDecimalDigitInverted => AnyDecimalDigitClassInverted.into(),
        ast::CharacterClass::AnyWhitespace => AnyWhitespaceClass.into(),
        ast::CharacterClass::AnyWhitespaceInverted => AnyWhitespaceClassInverted.into(),
    }
}

// character classes

/// The `\w` class, in character set format.
pub struct AnyWordClass;

impl AnyWordClass {
    const RANGES: [std::ops::RangeInclusive<char>; 4] =
        ['a'..='z', 'A'..='Z', '0'..='9', '_'..='_'];
}

impl From<AnyWordClass> for CharacterSet {
    fn from(_: AnyWordClass) -> Self {
        CharacterSet::inclusive(CharacterAlphabet::Ranges(AnyWordClass::RANGES.to_vec()))
    }
}

/// The `\W` class, in character set format.
pub struct AnyWordClassInverted;

impl From<AnyWordClassInverted> for CharacterSet {
    fn from(_: AnyWordClassInverted) -> Self {
        CharacterSet::exclusive(CharacterAlphabet::Ranges(AnyWordClass::RANGES.to_vec()))
    }
}

/// The `\d` class, in character set format.
pub struct AnyDecimalDigitClass;

impl AnyDecimalDigitClass {
    const RANGE: std::ops::RangeInclusive<char> = '0'..='9';
}

impl From<AnyDecimalDigitClass> for CharacterSet {
    fn from(_: AnyDecimalDigitClass) -> Self {
        CharacterSet::inclusive(CharacterAlphabet::Range(AnyDecimalDigitClass::RANGE))
    }
}

/// The `\D` class, in character set format.
pub struct AnyDecimalDigitClassInverted;

impl From<AnyDecimalDigitClassInverted> for CharacterSet {
    fn from(_: AnyDecimalDigitClassInverted) -> Self {
        CharacterSet::exclusive(CharacterAlphabet::Range(AnyDecimalDigitClass::RANGE))
    }
}

/// The `\s` class, in character set format.
pub struct AnyWhitespaceClass;

impl AnyWhitespaceClass {
    const CHARS: [char; 6] = [' ', '\t', '\n', '\r', '\x0B', '\x0C'];
}

impl From<AnyWhitespaceClass> for CharacterSet {
    fn from(_: AnyWhitespaceClass) -> Self {
        CharacterSet::inclusive(CharacterAlphabet::Explicit(
            AnyWhitespaceClass::CHARS.to_vec(),
        ))
    }
}

/// The `\S` class, in character set format.
pub struct AnyWhitespaceClassInverted;

impl From<AnyWhitespaceClassInverted> for CharacterSet {
    fn from(_: AnyWhitespaceClassInverted) -> Self {
        CharacterSet::exclusive(CharacterAlphabet::Explicit(
            AnyWhitespaceClass::CHARS.to_vec(),
        ))
    }
}
