use nfa_compiler::{compile, compile_with_options, CompileOptions};
use nfa_graph::{BreadthFirstTraversal, Graph, OpCode, Payload, StateId};
use pretty_assertions::assert_eq;

const WELL_FORMED: [&str; 16] = [
    "a",
    "ab",
    "a*",
    "a+",
    "a?",
    "a|b",
    "ab|cd|ef",
    "(a)",
    "(?:ab)*c",
    "a(b|c)+d",
    "((a|b)*c)?",
    "[a-z_]+\\d*",
    "[^\\s]|.",
    "\\(\\)\\|\\*",
    "(a*)*",
    "x(y?z+|w)*(v)",
];

fn reaches(graph: &Graph, from: StateId, target: StateId) -> bool {
    BreadthFirstTraversal::new(from, graph).any(|id| id == target)
}

fn dft_opcodes(graph: &Graph) -> Vec<OpCode> {
    graph
        .depth_first_traversal()
        .map(|id| graph[id].opcode())
        .collect()
}

#[test]
fn should_compile_every_well_formed_pattern() {
    for (test_id, pattern) in WELL_FORMED.into_iter().enumerate() {
        assert_eq!((test_id, true), (test_id, compile(pattern).is_ok()));
    }
}

#[test]
fn should_leave_no_dangling_edges() {
    for (test_id, pattern) in WELL_FORMED.into_iter().enumerate() {
        let graph = compile(pattern).unwrap();

        for id in graph.depth_first_traversal() {
            let state = &graph[id];
            let edges = (state.primary().is_some(), state.alt().is_some());

            let expected = match state.opcode() {
                OpCode::Rune | OpCode::Class | OpCode::Any | OpCode::Capture => (true, false),
                OpCode::Split | OpCode::SplitToMatch => (true, true),
                OpCode::Match => (false, false),
                OpCode::Fail => panic!("fail state in compiled graph of {:?}", pattern),
            };

            assert_eq!((test_id, id, expected), (test_id, id, edges));
        }
    }
}

#[test]
fn should_contain_exactly_one_reachable_match_state() {
    for (test_id, pattern) in WELL_FORMED.into_iter().enumerate() {
        let graph = compile(pattern).unwrap();

        let matches: Vec<_> = graph
            .depth_first_traversal()
            .filter(|&id| graph[id].opcode() == OpCode::Match)
            .collect();

        // the match state is always allocated last.
        let last = StateId::from(graph.len() as u32 - 1);
        assert_eq!((test_id, vec![last]), (test_id, matches));
    }
}

#[test]
fn should_reach_every_state_from_the_entry() {
    for (test_id, pattern) in WELL_FORMED.into_iter().enumerate() {
        let graph = compile(pattern).unwrap();

        assert_eq!(
            (test_id, graph.len()),
            (test_id, graph.depth_first_traversal().count())
        );
    }
}

#[test]
fn should_only_exit_repetitions_through_the_alt_edge() {
    let input_output = [("a*", 1), ("a+", 1), ("(?:ab)*c", 2), ("a(?:bc)+", 3)];

    for (test_id, (pattern, split_idx)) in input_output.into_iter().enumerate() {
        let graph = compile(pattern).unwrap();
        let split = StateId::from(split_idx);
        let state = &graph[split];

        assert_eq!((test_id, OpCode::Split), (test_id, state.opcode()));

        let primary = state.primary().unwrap();
        let alt = state.alt().unwrap();

        // the primary edge loops back into the split, the alt edge never does.
        assert!(reaches(&graph, primary, split), "case {}", test_id);
        assert!(!reaches(&graph, alt, split), "case {}", test_id);
        assert!(reaches(&graph, alt, graph.match_state().unwrap()));
    }
}

#[test]
fn should_not_introduce_cycles_for_optional_or_alternation() {
    for (test_id, pattern) in ["a?", "a|b", "a?b?", "(a|b)?c"].into_iter().enumerate() {
        let graph = compile(pattern).unwrap();

        for (id, _) in graph.states() {
            let cyclic = graph.successors(id).any(|next| reaches(&graph, next, id));
            assert_eq!((test_id, id, false), (test_id, id, cyclic));
        }
    }
}

#[test]
fn should_prefer_the_operand_on_the_primary_edge() {
    let input_output = [("a?", "b"), ("a*", "b"), ("a+", "b")];

    for (test_id, (quantified, tail)) in input_output.into_iter().enumerate() {
        let pattern = format!("{}{}", quantified, tail);
        let graph = compile(&pattern).unwrap();

        let (split, state) = graph
            .states()
            .find(|(_, state)| state.opcode() == OpCode::Split)
            .unwrap();

        let primary = state.primary().unwrap();
        let alt = state.alt().unwrap();

        assert_eq!((test_id, &Payload::Rune('a')), (test_id, graph[primary].payload()));
        assert_eq!((test_id, &Payload::Rune('b')), (test_id, graph[alt].payload()));
        assert!(split != primary);
    }
}

#[test]
fn should_recompile_into_isomorphic_graphs() {
    for (test_id, pattern) in WELL_FORMED.into_iter().enumerate() {
        let first = compile(pattern).unwrap();
        let second = compile(pattern).unwrap();

        assert_eq!(
            (test_id, first.len(), dft_opcodes(&first)),
            (test_id, second.len(), dft_opcodes(&second))
        );
        assert_eq!(first, second);
    }
}

#[test]
fn should_render_a_readable_graph_dump() {
    let graph = compile("(a|b)*c").unwrap();

    let expected = "\
 0000: Rune 'a' -> (0004)
 0001: Rune 'b' -> (0004)
 0002: Split (0000), (0001)
 0003: Capture Start[0000] -> (0002)
 0004: Capture End[0000] -> (0005)
*0005: Split (0003), (0006)
 0006: Rune 'c' -> (0007)
 0007: Match
";

    assert_eq!(expected, graph.to_string());
}

#[test]
fn should_terminate_every_split_to_match_at_the_match_state() {
    let options = CompileOptions::default().with_split_to_match(true);

    for (test_id, pattern) in WELL_FORMED.into_iter().enumerate() {
        let graph = compile_with_options(pattern, options).unwrap();
        let accept = graph.match_state();

        for (id, state) in graph.states() {
            if state.opcode() == OpCode::SplitToMatch {
                assert_eq!((test_id, id, accept), (test_id, id, state.alt()));
            }
        }
    }
}
