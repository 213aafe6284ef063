use std::fmt::Write;

use regex::escape;

use super::ast::{AlternationNode, ClassNode, PatternAst, PatternNode};
use super::{CompiledPattern, PatternResult, parse_pattern};

#[derive(Debug, Clone, PartialEq)]
pub struct PatternAnalysis {
    pub pattern: String,
    pub ast: PatternAst,
    pub compiled: CompiledPattern,
    pub regex: String,
}

pub fn analyze(pattern: &str, separator: Option<char>) -> PatternResult<PatternAnalysis> {
    let ast = parse_pattern(pattern)?;
    let compiled = CompiledPattern::new(pattern, separator)?;
    let regex = compiled.to_regex();

    Ok(PatternAnalysis {
        pattern: pattern.to_string(),
        ast,
        compiled,
        regex,
    })
}

pub(crate) fn build_regex(nodes: &[PatternNode], separator: Option<char>) -> String {
    let mut regex = String::from("(?s)^");
    push_nodes(&mut regex, nodes, separator);
    regex.push('$');
    regex
}

fn push_nodes(out: &mut String, nodes: &[PatternNode], separator: Option<char>) {
    for node in nodes {
        push_node(out, node, separator);
    }
}

fn push_node(out: &mut String, node: &PatternNode, separator: Option<char>) {
    match node {
        PatternNode::Literal(value) => out.push_str(&escape(value)),
        PatternNode::AnyOne => push_any(out, separator),
        PatternNode::AnyRun => {
            push_any(out, separator);
            out.push('*');
        }
        PatternNode::AnyRunUnbounded => out.push_str(".*"),
        PatternNode::Class(class) => push_class(out, class),
        PatternNode::Alternation(alt) => push_alternation(out, alt, separator),
    }
}

fn push_any(out: &mut String, separator: Option<char>) {
    match separator {
        Some(sep) => {
            out.push_str("[^");
            push_code_point(out, sep);
            out.push(']');
        }
        None => out.push('.'),
    }
}

fn push_class(out: &mut String, class: &ClassNode) {
    out.push('[');
    if class.negated {
        out.push('^');
    }
    for range in &class.ranges {
        push_code_point(out, range.start);
        if range.end != range.start {
            out.push('-');
            push_code_point(out, range.end);
        }
    }
    out.push(']');
}

fn push_alternation(out: &mut String, alt: &AlternationNode, separator: Option<char>) {
    out.push_str("(?:");
    for (idx, branch) in alt.branches.iter().enumerate() {
        if idx > 0 {
            out.push('|');
        }
        push_nodes(out, branch, separator);
    }
    out.push(')');
}

fn push_code_point(out: &mut String, ch: char) {
    let _ = write!(out, "\\x{{{:X}}}", ch as u32);
}
