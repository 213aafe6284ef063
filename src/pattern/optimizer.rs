use std::fmt;

use super::ast::{AlternationNode, PatternNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FastPath {
    Exact,
    PrefixOnly,
    SuffixOnly,
    General,
}

impl fmt::Display for FastPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exact => "exact",
            Self::PrefixOnly => "prefix",
            Self::SuffixOnly => "suffix",
            Self::General => "general",
        };
        f.write_str(name)
    }
}

pub fn optimize(nodes: Vec<PatternNode>) -> (Vec<PatternNode>, FastPath) {
    let nodes = optimize_sequence(nodes);
    let fast_path = classify(&nodes);
    (nodes, fast_path)
}

fn optimize_sequence(nodes: Vec<PatternNode>) -> Vec<PatternNode> {
    let mut out: Vec<PatternNode> = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            PatternNode::Alternation(alt) => {
                let mut branches: Vec<Vec<PatternNode>> =
                    alt.branches.into_iter().map(optimize_sequence).collect();
                if branches.len() == 1 {
                    for inner in branches.pop().unwrap_or_default() {
                        push_node(&mut out, inner);
                    }
                } else {
                    push_node(
                        &mut out,
                        PatternNode::Alternation(AlternationNode::new(branches)),
                    );
                }
            }
            other => push_node(&mut out, other),
        }
    }

    out
}

fn push_node(out: &mut Vec<PatternNode>, node: PatternNode) {
    match (out.last_mut(), &node) {
        (_, PatternNode::Literal(text)) if text.is_empty() => return,
        (Some(PatternNode::Literal(existing)), PatternNode::Literal(text)) => {
            existing.push_str(text);
            return;
        }
        (Some(PatternNode::AnyRun | PatternNode::AnyRunUnbounded), PatternNode::AnyRun) => return,
        (Some(last), PatternNode::AnyRunUnbounded) if last.is_run() => {
            *last = PatternNode::AnyRunUnbounded;
            return;
        }
        _ => {}
    }
    out.push(node);
}

fn classify(nodes: &[PatternNode]) -> FastPath {
    match nodes {
        [PatternNode::Literal(_)] => FastPath::Exact,
        [PatternNode::Literal(_), PatternNode::AnyRun] => FastPath::PrefixOnly,
        [PatternNode::AnyRun, PatternNode::Literal(_)] => FastPath::SuffixOnly,
        _ => FastPath::General,
    }
}
