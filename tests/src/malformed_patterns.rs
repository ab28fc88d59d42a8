use nfa_compiler::{
    compile, compile_with_options, ClassSpecReason, CompileError, CompileOptions, MalformedReason,
};
use pretty_assertions::assert_eq;

#[test]
fn should_reject_malformed_patterns_without_a_graph() {
    let corpus = [
        "*", "+a", "?", "(", "(a", "a(b", ")", "a)", "|", "a|", "|a", "(a|)", "()", "",
        "a{2}", "^a", "a$", "\\b", "\\", "a]", "a*?", "a+?", "a??",
    ];

    for (test_id, pattern) in corpus.into_iter().enumerate() {
        let res = compile(pattern);

        assert_eq!(
            (test_id, pattern, true),
            (test_id, pattern, res.map_err(|e| e.is_malformed()).unwrap_err())
        );
    }
}

#[test]
fn should_reject_lazy_quantifiers_at_the_modifier() {
    let input_output = [
        ("a*?", 2, MalformedReason::LazyQuantifier('*')),
        ("a+?", 2, MalformedReason::LazyQuantifier('+')),
        ("a??", 2, MalformedReason::LazyQuantifier('?')),
        ("x(ab)*?", 6, MalformedReason::LazyQuantifier('*')),
    ];

    for (test_id, (pattern, position, reason)) in input_output.into_iter().enumerate() {
        assert_eq!(
            (
                test_id,
                Err(CompileError::MalformedPattern { position, reason })
            ),
            (test_id, compile(pattern))
        );
    }

    // nesting greedy quantifiers needs an explicit group.
    assert!(compile("(a*)?").is_ok());
}

#[test]
fn should_reject_invalid_class_specs() {
    let input_output = [
        ("[ab", 0, ClassSpecReason::Unterminated),
        ("a[]", 1, ClassSpecReason::Empty),
        ("[^]", 0, ClassSpecReason::Empty),
        (
            "ab[9-0]",
            2,
            ClassSpecReason::ReversedRange {
                lower: '9',
                upper: '0',
            },
        ),
        ("[a\\W]", 0, ClassSpecReason::NegatedShorthand('W')),
        ("[\\k]", 0, ClassSpecReason::UnsupportedEscape('k')),
    ];

    for (test_id, (pattern, position, reason)) in input_output.into_iter().enumerate() {
        assert_eq!(
            (
                test_id,
                Err(CompileError::InvalidClassSpec { position, reason })
            ),
            (test_id, compile(pattern))
        );
    }
}

#[test]
fn should_locate_errors_by_character_index() {
    let input_output = [("éé*|", Some(3)), ("ü(", Some(1)), ("日本)", Some(2))];

    for (test_id, (pattern, position)) in input_output.into_iter().enumerate() {
        assert_eq!(
            (test_id, position),
            (test_id, compile(pattern).unwrap_err().position())
        );
    }
}

#[test]
fn should_fail_identically_on_every_attempt() {
    for pattern in ["a||", "(()", "[z-a]"] {
        assert_eq!(compile(pattern), compile(pattern));
    }
}

#[test]
fn should_bound_pattern_length_when_limited() {
    let options = CompileOptions::default().with_size_limit(8);
    let pattern = "a".repeat(9);

    let err = compile_with_options(&pattern, options).unwrap_err();

    assert_eq!(CompileError::PatternTooLarge { len: 9, limit: 8 }, err);
    assert_eq!(None, err.position());
}
