use bunner_glob_rs::pattern::{
    ClassRange, MAX_ALTERNATION_DEPTH, PatternError, PatternNode, parse_pattern,
};

#[test]
fn parser_when_literal_and_run_then_emits_three_nodes() {
    let ast = parse_pattern("src/*.go").expect("pattern should parse");
    assert_eq!(ast.nodes.len(), 3);
    match &ast.nodes[0] {
        PatternNode::Literal(text) => assert_eq!(text, "src/"),
        other => panic!("expected literal node, got {other:?}"),
    }
    assert_eq!(ast.nodes[1], PatternNode::AnyRun);
    match &ast.nodes[2] {
        PatternNode::Literal(text) => assert_eq!(text, ".go"),
        other => panic!("expected literal node, got {other:?}"),
    }
}

#[test]
fn parser_when_pattern_empty_then_emits_no_nodes() {
    let ast = parse_pattern("").expect("empty pattern should parse");
    assert!(ast.is_empty());
}

#[test]
fn parser_when_question_marks_then_emits_any_one_each() {
    let ast = parse_pattern("??").expect("pattern should parse");
    assert_eq!(ast.nodes, vec![PatternNode::AnyOne, PatternNode::AnyOne]);
}

#[test]
fn parser_when_double_star_then_emits_unbounded_run() {
    let ast = parse_pattern("a**b").expect("pattern should parse");
    assert_eq!(ast.nodes[1], PatternNode::AnyRunUnbounded);
}

#[test]
fn parser_when_star_run_not_doubled_then_emits_bounded_run() {
    for pattern in ["*", "***", "****"] {
        let ast = parse_pattern(pattern).expect("pattern should parse");
        assert_eq!(ast.nodes, vec![PatternNode::AnyRun], "pattern {pattern}");
    }
}

#[test]
fn parser_when_class_has_range_and_single_then_keeps_both() {
    let ast = parse_pattern("[a-cx]").expect("pattern should parse");
    match &ast.nodes[0] {
        PatternNode::Class(class) => {
            assert!(!class.negated);
            assert_eq!(
                class.ranges.as_slice(),
                &[ClassRange::new('a', 'c'), ClassRange::single('x')]
            );
        }
        other => panic!("expected class node, got {other:?}"),
    }
}

#[test]
fn parser_when_class_starts_with_bang_or_caret_then_negates() {
    for pattern in ["[!0-9]", "[^0-9]"] {
        let ast = parse_pattern(pattern).expect("pattern should parse");
        match &ast.nodes[0] {
            PatternNode::Class(class) => {
                assert!(class.negated, "pattern {pattern}");
                assert_eq!(class.ranges.as_slice(), &[ClassRange::new('0', '9')]);
            }
            other => panic!("expected class node, got {other:?}"),
        }
    }
}

#[test]
fn parser_when_class_starts_with_bracket_then_bracket_is_member() {
    let ast = parse_pattern("[]a]").expect("pattern should parse");
    match &ast.nodes[0] {
        PatternNode::Class(class) => {
            assert_eq!(
                class.ranges.as_slice(),
                &[ClassRange::single(']'), ClassRange::single('a')]
            );
        }
        other => panic!("expected class node, got {other:?}"),
    }
}

#[test]
fn parser_when_dash_at_class_edges_then_dash_is_literal() {
    let ast = parse_pattern("[-a-]").expect("pattern should parse");
    match &ast.nodes[0] {
        PatternNode::Class(class) => {
            assert_eq!(
                class.ranges.as_slice(),
                &[
                    ClassRange::single('-'),
                    ClassRange::single('a'),
                    ClassRange::single('-')
                ]
            );
        }
        other => panic!("expected class node, got {other:?}"),
    }
}

#[test]
fn parser_when_dash_escaped_in_class_then_no_range() {
    let ast = parse_pattern(r"[a\-z]").expect("pattern should parse");
    match &ast.nodes[0] {
        PatternNode::Class(class) => assert_eq!(class.ranges.len(), 3),
        other => panic!("expected class node, got {other:?}"),
    }
}

#[test]
fn parser_when_alternation_nested_then_keeps_structure() {
    let ast = parse_pattern("{a,{b,c}d}").expect("pattern should parse");
    match &ast.nodes[0] {
        PatternNode::Alternation(alt) => {
            assert_eq!(alt.branches.len(), 2);
            assert_eq!(alt.branches[0], vec![PatternNode::Literal("a".to_string())]);
            match alt.branches[1].as_slice() {
                [PatternNode::Alternation(inner), PatternNode::Literal(tail)] => {
                    assert_eq!(inner.branches.len(), 2);
                    assert_eq!(tail, "d");
                }
                other => panic!("expected nested alternation, got {other:?}"),
            }
        }
        other => panic!("expected alternation node, got {other:?}"),
    }
}

#[test]
fn parser_when_comma_inside_class_then_branch_not_split() {
    let ast = parse_pattern("{[,],x}").expect("pattern should parse");
    match &ast.nodes[0] {
        PatternNode::Alternation(alt) => assert_eq!(alt.branches.len(), 2),
        other => panic!("expected alternation node, got {other:?}"),
    }
}

#[test]
fn parser_when_stray_closers_then_treats_them_as_literal() {
    let ast = parse_pattern("a,b}c]").expect("pattern should parse");
    assert_eq!(ast.nodes, vec![PatternNode::Literal("a,b}c]".to_string())]);
}

#[test]
fn parser_when_meta_escaped_then_emits_literal() {
    let ast = parse_pattern(r"file\*\{1\}").expect("pattern should parse with escapes");
    assert_eq!(ast.nodes, vec![PatternNode::Literal("file*{1}".to_string())]);
}

#[test]
fn parser_when_class_unterminated_then_reports_start() {
    let err = parse_pattern("ab[cd").expect_err("unterminated class should fail");
    match err {
        PatternError::UnterminatedClass { start, .. } => assert_eq!(start, 2),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn parser_when_alternation_unterminated_then_reports_start() {
    let err = parse_pattern("x{a,{b}").expect_err("unterminated alternation should fail");
    match err {
        PatternError::UnterminatedAlternation { start, .. } => assert_eq!(start, 1),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn parser_when_class_empty_then_rejects() {
    for pattern in ["[]", "[!]", "a[^]"] {
        let err = parse_pattern(pattern).expect_err("empty class should fail");
        match err {
            PatternError::EmptyClass { .. } => {}
            other => panic!("unexpected error for {pattern}: {other:?}"),
        }
    }
}

#[test]
fn parser_when_range_inverted_then_reports_bounds() {
    let err = parse_pattern("[z-a]").expect_err("inverted range should fail");
    match err {
        PatternError::InvertedRange {
            index, start, end, ..
        } => {
            assert_eq!(index, 1);
            assert_eq!(start, 'z');
            assert_eq!(end, 'a');
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn parser_when_escape_dangles_then_reports_index() {
    let err = parse_pattern(r"abc\").expect_err("dangling escape should fail");
    match err {
        PatternError::LoneEscapeCharacter { index, .. } => assert_eq!(index, 3),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn error_when_displayed_then_exposes_kind_and_offset() {
    let err = parse_pattern("ok{a,b").expect_err("unterminated alternation should fail");
    assert_eq!(err.kind(), "alternation");
    assert_eq!(err.offset(), 2);
    assert_eq!(err.pattern(), "ok{a,b");
    assert!(err.to_string().contains("byte 2"));
}

#[test]
fn parser_when_nesting_exceeds_limit_then_reports_offending_brace() {
    let depth = 20_000;
    let pattern = "{".repeat(depth) + "a" + &"}".repeat(depth);
    let err = parse_pattern(&pattern).expect_err("deep nesting should fail");
    match &err {
        PatternError::NestingTooDeep { start, limit, .. } => {
            assert_eq!(*start, MAX_ALTERNATION_DEPTH);
            assert_eq!(*limit, MAX_ALTERNATION_DEPTH);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), "alternation");
    assert_eq!(err.offset(), MAX_ALTERNATION_DEPTH);
}

#[test]
fn parser_when_unclosed_nesting_exceeds_limit_then_reports_depth_first() {
    let err = parse_pattern(&"{".repeat(10_000)).expect_err("deep nesting should fail");
    assert!(matches!(err, PatternError::NestingTooDeep { .. }));
}

#[test]
fn parser_when_nesting_at_limit_then_parses() {
    let depth = MAX_ALTERNATION_DEPTH;
    let pattern = "{x,".repeat(depth) + "a" + &"}".repeat(depth);
    let ast = parse_pattern(&pattern).expect("nesting at the limit should parse");
    assert_eq!(ast.nodes.len(), 1);
}
