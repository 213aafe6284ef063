use std::fmt;

use super::analysis::build_regex;
use super::ast::PatternNode;
use super::matcher::{Program, match_pattern};
use super::optimizer::{FastPath, optimize};
use super::{PatternResult, parse_pattern};

/// A glob pattern compiled once and matched many times.
///
/// Holds only owned, immutable data, so a single instance can be shared
/// across threads (`Send + Sync`) without locking.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: Box<str>,
    nodes: Vec<PatternNode>,
    separator: Option<char>,
    fast_path: FastPath,
    program: Program,
}

impl CompiledPattern {
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(pattern_len = pattern.len() as u64, separator = ?separator)
    )]
    pub fn new(pattern: &str, separator: Option<char>) -> PatternResult<Self> {
        let ast = match parse_pattern(pattern) {
            Ok(ast) => ast,
            Err(err) => {
                tracing::event!(
                    tracing::Level::DEBUG,
                    operation = "compile",
                    kind = err.kind(),
                    offset = err.offset() as u64,
                    "pattern rejected"
                );
                return Err(err);
            }
        };

        let (nodes, fast_path) = optimize(ast.nodes);
        let program = Program::lower(&nodes);

        tracing::event!(
            tracing::Level::TRACE,
            operation = "compile",
            nodes = nodes.len() as u64,
            sequences = program.sequence_count() as u64,
            fast_path = %fast_path
        );

        Ok(Self {
            pattern: pattern.into(),
            nodes,
            separator,
            fast_path,
            program,
        })
    }

    #[inline]
    pub fn matches(&self, input: &str) -> bool {
        match_pattern(self, input)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn separator(&self) -> Option<char> {
        self.separator
    }

    pub fn fast_path(&self) -> FastPath {
        self.fast_path
    }

    pub fn nodes(&self) -> &[PatternNode] {
        &self.nodes
    }

    /// Anchored regular-expression source accepting exactly the inputs this pattern accepts.
    pub fn to_regex(&self) -> String {
        build_regex(&self.nodes, self.separator)
    }

    pub(crate) fn program(&self) -> &Program {
        &self.program
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.separator == other.separator && self.nodes == other.nodes
    }
}

impl Eq for CompiledPattern {}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
