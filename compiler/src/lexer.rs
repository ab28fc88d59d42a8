//! Splits a pattern into position tagged tokens.
//!
//! The lexer is built from `parcel` combinators over `(index, char)` pairs.
//! It only recognizes the shape of individual tokens; whether the tokens form
//! a balanced pattern is decided by the compiler's operand stack.

use parcel::parsers::character::expect_character;
use parcel::prelude::v1::*;

use super::ast;
use super::error::{ClassSpecReason, CompileError, MalformedReason};

/// A single lexical item of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Rune(char),
    Any,
    Class(ast::MatchCharacterClass),
    Quantifier(ast::Quantifier),
    Alternation,
    GroupOpen(ast::GroupKind),
    GroupClose,
}

/// A token paired with the character index it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub position: usize,
    pub token: Token,
}

impl Spanned {
    pub fn new(position: usize, token: Token) -> Self {
        Self { position, token }
    }
}

/// Characters that carry meaning outside of a character class and must be
/// escaped to be matched literally.
const METACHARACTERS: [char; 14] = [
    '.', '[', ']', '(', ')', '|', '?', '*', '+', '{', '}', '^', '$', '\\',
];

/// Tokenizes `pattern`, tagging each token with its character index.
pub fn tokenize(pattern: &str) -> Result<Vec<Spanned>, CompileError> {
    let input: Vec<(usize, char)> = pattern.chars().enumerate().collect();
    let parser = token();

    let mut tokens = Vec::with_capacity(input.len());
    let mut remainder = &input[..];

    while let Some(&(position, next)) = remainder.first() {
        match parser.parse(remainder) {
            Ok(MatchStatus::Match {
                remainder: rest,
                inner,
                ..
            }) => {
                tokens.push(Spanned::new(position, inner));
                remainder = rest;
            }
            Ok(MatchStatus::NoMatch(_)) => return Err(diagnose(remainder, position, next)),
            Err(err) => return Err(CompileError::Parser(err.to_string())),
        }
    }

    Ok(tokens)
}

/// Determines why no token could be read at the head of `input`.
fn diagnose(input: &[(usize, char)], position: usize, next: char) -> CompileError {
    let following = input.get(1).map(|&(_, c)| c);

    match (next, following) {
        ('[', _) => CompileError::invalid_class(position, diagnose_class(&input[1..])),
        ('\\', None) => CompileError::malformed(position, MalformedReason::TrailingEscape),
        ('\\', Some(c)) => CompileError::malformed(position, MalformedReason::UnsupportedEscape(c)),
        // the lazy modifier is reported at the trailing `?`.
        (c @ ('*' | '+' | '?'), Some('?')) => {
            CompileError::malformed(position + 1, MalformedReason::LazyQuantifier(c))
        }
        (c, _) => CompileError::malformed(position, MalformedReason::Unsupported(c)),
    }
}

fn diagnose_class(input: &[(usize, char)]) -> ClassSpecReason {
    let mut chars = input.iter().map(|&(_, c)| c).peekable();
    chars.next_if_eq(&'^');

    if chars.peek() == Some(&']') {
        return ClassSpecReason::Empty;
    }

    while let Some(c) = chars.next() {
        match c {
            ']' => break,
            '\\' => match chars.next() {
                Some(escaped)
                    if char_to_escaped_equivalent(escaped).is_none()
                        && ast::CharacterClass::from_shorthand(escaped).is_none() =>
                {
                    return ClassSpecReason::UnsupportedEscape(escaped)
                }
                Some(_) => continue,
                None => break,
            },
            _ => continue,
        }
    }

    ClassSpecReason::Unterminated
}

fn token<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], Token> {
    parcel::or(group_open().map(Token::GroupOpen), || {
        parcel::or(expect_character(')').map(|_| Token::GroupClose), || {
            parcel::or(expect_character('|').map(|_| Token::Alternation), || {
                parcel::or(quantifier().map(Token::Quantifier), || {
                    parcel::or(expect_character('.').map(|_| Token::Any), || {
                        parcel::or(match_character_class().map(Token::Class), || {
                            match_character().map(|ast::Char(c)| Token::Rune(c))
                        })
                    })
                })
            })
        })
    })
}

// Group

fn group_open<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ast::GroupKind> {
    parcel::right(parcel::join(
        expect_character('('),
        parcel::optional(group_non_capturing_modifier())
            .map(|non_capturing| non_capturing.is_some()),
    ))
    .map(|is_non_capturing| match is_non_capturing {
        true => ast::GroupKind::NonCapturing,
        false => ast::GroupKind::Capturing,
    })
}

fn group_non_capturing_modifier<'a>(
) -> impl Parser<'a, &'a [(usize, char)], ast::GroupNonCapturingModifier> {
    parcel::join(expect_character('?'), expect_character(':'))
        .map(|_| ast::GroupNonCapturingModifier)
}

// Quantifiers

/// Matches a greedy quantifier. A trailing `?` marks the lazy form, which is
/// left unmatched so that it can be diagnosed.
fn quantifier<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ast::Quantifier> {
    parcel::join(
        quantifier_type(),
        parcel::optional(expect_character('?')),
    )
    .predicate(|(_, lazy_modifier)| lazy_modifier.is_none())
    .map(|(quantifier, _)| quantifier)
}

fn quantifier_type<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ast::Quantifier> {
    parcel::or(
        expect_character('*').map(|_| ast::Quantifier::ZeroOrMore),
        || {
            parcel::or(
                expect_character('+').map(|_| ast::Quantifier::OneOrMore),
                || expect_character('?').map(|_| ast::Quantifier::ZeroOrOne),
            )
        },
    )
}

// Matchers

fn match_character_class<'a>(
) -> impl parcel::Parser<'a, &'a [(usize, char)], ast::MatchCharacterClass> {
    parcel::or(character_group().map(Into::into), || {
        character_class().map(Into::into)
    })
}

fn match_character<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ast::Char> {
    parcel::or(escaped_character(), || {
        unescaped_character(|c| !METACHARACTERS.contains(&c))
    })
    .map(ast::Char)
}

// Character Classes

fn character_group<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ast::CharacterGroup> {
    parcel::join(
        parcel::right(parcel::join(
            expect_character('['),
            parcel::optional(character_group_negative_modifier())
                .map(|negation| negation.is_some()),
        )),
        parcel::left(parcel::join(
            parcel::one_or_more(character_group_item()),
            expect_character(']'),
        )),
    )
    .map(|(negation, character_group_items)| match negation {
        true => ast::CharacterGroup::NegatedItems(character_group_items),
        false => ast::CharacterGroup::Items(character_group_items),
    })
}

fn character_group_negative_modifier<'a>(
) -> impl parcel::Parser<'a, &'a [(usize, char)], ast::CharacterGroupNegativeModifier> {
    expect_character('^').map(|_| ast::CharacterGroupNegativeModifier)
}

fn character_group_item<'a>(
) -> impl parcel::Parser<'a, &'a [(usize, char)], ast::CharacterGroupItem> {
    parcel::or(character_class().map(Into::into), || {
        parcel::or(character_range().map(Into::into), || {
            class_character().map(Into::into)
        })
    })
}

fn character_class<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ast::CharacterClass> {
    move |input: &'a [(usize, char)]| match input.get(0..2) {
        Some(&[(escape_pos, '\\'), (class_pos, shorthand)]) => {
            match ast::CharacterClass::from_shorthand(shorthand) {
                Some(class) => Ok(MatchStatus::Match {
                    span: escape_pos..class_pos + 1,
                    remainder: &input[2..],
                    inner: class,
                }),
                None => Ok(MatchStatus::NoMatch(input)),
            }
        }
        _ => Ok(MatchStatus::NoMatch(input)),
    }
}

fn character_range<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], ast::CharacterRange> {
    parcel::join(
        class_character(),
        parcel::right(parcel::join(expect_character('-'), class_character())),
    )
    .map(|(lower_bound, upper_bound)| ast::CharacterRange::new(lower_bound, upper_bound))
}

/// Any character permitted inside a character group, excluding the closing
/// bracket.
fn class_character<'a>() -> impl Parser<'a, &'a [(usize, char)], ast::Char> {
    parcel::or(escaped_character(), || {
        unescaped_character(|c| c != ']' && c != '\\')
    })
    .map(ast::Char)
}

// Terminals

fn unescaped_character<'a, F>(predicate: F) -> impl Parser<'a, &'a [(usize, char)], char>
where
    F: Fn(char) -> bool + 'a,
{
    move |input: &'a [(usize, char)]| match input.first() {
        Some(&(next_pos, next)) if predicate(next) => Ok(MatchStatus::Match {
            span: next_pos..next_pos + 1,
            remainder: &input[1..],
            inner: next,
        }),
        _ => Ok(MatchStatus::NoMatch(input)),
    }
}

fn escaped_character<'a>() -> impl Parser<'a, &'a [(usize, char)], char> {
    move |input: &'a [(usize, char)]| match input.get(0..2) {
        Some(&[(escape_pos, '\\'), (to_escape_pos, to_escape)]) => {
            match char_to_escaped_equivalent(to_escape) {
                Some(escaped_char) => Ok(MatchStatus::Match {
                    span: escape_pos..to_escape_pos + 1,
                    remainder: &input[2..],
                    inner: escaped_char,
                }),
                None => Ok(MatchStatus::NoMatch(input)),
            }
        }
        _ => Ok(MatchStatus::NoMatch(input)),
    }
}

fn char_to_escaped_equivalent(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\'' => Some('\''),
        '\"' => Some('\"'),
        '-' => Some('-'),
        '/' => Some('/'),
        c if METACHARACTERS.contains(&c) => Some(c),
        _ => None,
    }
}
