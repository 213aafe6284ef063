use smallvec::SmallVec;
use std::mem;

use crate::pattern::ast::{AlternationNode, ClassNode, ClassRange, PatternAst, PatternNode};
use crate::pattern::{PatternError, PatternResult};

/// Deepest alternation nesting `parse_pattern` accepts.
pub const MAX_ALTERNATION_DEPTH: usize = 256;

#[tracing::instrument(level = "trace", fields(pattern_len = pattern.len() as u64))]
pub fn parse_pattern(pattern: &str) -> PatternResult<PatternAst> {
    let mut parser = PatternParser::new(pattern);
    let nodes = parser.parse()?;
    debug_assert!(parser.peek().is_none());

    Ok(PatternAst::new(nodes))
}

// An alternation whose closing '}' has not been reached yet.
struct OpenGroup {
    start: usize,
    branches: Vec<Vec<PatternNode>>,
    outer: Vec<PatternNode>,
}

struct PatternParser<'a> {
    pattern: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
}

impl<'a> PatternParser<'a> {
    fn new(pattern: &'a str) -> Self {
        let chars: Vec<(usize, char)> = pattern.char_indices().collect();
        Self {
            pattern,
            chars,
            index: 0,
        }
    }

    // Open alternations live on `groups`, so nesting depth never grows the call stack.
    fn parse(&mut self) -> PatternResult<Vec<PatternNode>> {
        let mut groups: Vec<OpenGroup> = Vec::new();
        let mut nodes = Vec::new();

        while let Some(ch) = self.peek() {
            let nested = !groups.is_empty();
            match ch {
                '{' => {
                    let start = self.current_byte_index();
                    if groups.len() == MAX_ALTERNATION_DEPTH {
                        return Err(PatternError::NestingTooDeep {
                            pattern: self.pattern.to_string(),
                            start,
                            limit: MAX_ALTERNATION_DEPTH,
                        });
                    }
                    self.next();
                    groups.push(OpenGroup {
                        start,
                        branches: Vec::new(),
                        outer: mem::take(&mut nodes),
                    });
                }
                ',' if nested => {
                    self.next();
                    if let Some(group) = groups.last_mut() {
                        group.branches.push(mem::take(&mut nodes));
                    }
                }
                '}' if nested => {
                    self.next();
                    if let Some(mut group) = groups.pop() {
                        group.branches.push(mem::take(&mut nodes));
                        nodes = group.outer;
                        nodes.push(PatternNode::Alternation(AlternationNode::new(
                            group.branches,
                        )));
                    }
                }
                '*' => {
                    nodes.push(self.parse_wildcard_run());
                }
                '?' => {
                    self.next();
                    nodes.push(PatternNode::AnyOne);
                }
                '[' => {
                    nodes.push(self.parse_class()?);
                }
                _ => {
                    nodes.push(self.parse_literal(nested)?);
                }
            }
        }

        // The innermost unclosed group is reported.
        if let Some(group) = groups.pop() {
            return Err(PatternError::UnterminatedAlternation {
                pattern: self.pattern.to_string(),
                start: group.start,
            });
        }

        Ok(nodes)
    }

    fn parse_literal(&mut self, nested: bool) -> PatternResult<PatternNode> {
        let mut literal = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '*' | '?' | '[' | '{' => {
                    break;
                }
                ',' | '}' if nested => {
                    break;
                }
                '\\' => {
                    literal.push(self.consume_escape_char()?);
                }
                _ => {
                    literal.push(ch);
                    self.next();
                }
            }
        }
        Ok(PatternNode::Literal(literal))
    }

    fn parse_wildcard_run(&mut self) -> PatternNode {
        let mut count = 0usize;
        while self.peek() == Some('*') {
            self.next();
            count += 1;
        }

        if count == 2 {
            PatternNode::AnyRunUnbounded
        } else {
            PatternNode::AnyRun
        }
    }

    fn parse_class(&mut self) -> PatternResult<PatternNode> {
        let start = self.current_byte_index();
        self.expect('[');

        let negated = matches!(self.peek(), Some('!' | '^'));
        if negated {
            self.next();
        }

        let mut ranges: SmallVec<[ClassRange; 4]> = SmallVec::new();
        let mut first = true;
        loop {
            let Some(ch) = self.peek() else {
                return Err(PatternError::UnterminatedClass {
                    pattern: self.pattern.to_string(),
                    start,
                });
            };

            if ch == ']' {
                if !first {
                    self.next();
                    break;
                }
                if !self.closes_class_after(self.index + 1) {
                    return Err(PatternError::EmptyClass {
                        pattern: self.pattern.to_string(),
                        start,
                    });
                }
            }
            first = false;

            let lo_index = self.current_byte_index();
            let lo = self.parse_class_char(start)?;
            let is_range = self.peek() == Some('-') && self.peek_at(1).is_some_and(|c| c != ']');
            if !is_range {
                ranges.push(ClassRange::single(lo));
                continue;
            }

            self.expect('-');
            let hi = self.parse_class_char(start)?;
            if hi < lo {
                return Err(PatternError::InvertedRange {
                    pattern: self.pattern.to_string(),
                    index: lo_index,
                    start: lo,
                    end: hi,
                });
            }
            ranges.push(ClassRange::new(lo, hi));
        }

        Ok(PatternNode::Class(ClassNode::new(ranges, negated)))
    }

    fn parse_class_char(&mut self, start: usize) -> PatternResult<char> {
        match self.peek() {
            Some('\\') => self.consume_escape_char(),
            Some(ch) => {
                self.next();
                Ok(ch)
            }
            None => Err(PatternError::UnterminatedClass {
                pattern: self.pattern.to_string(),
                start,
            }),
        }
    }

    fn closes_class_after(&self, mut index: usize) -> bool {
        while let Some(&(_, ch)) = self.chars.get(index) {
            match ch {
                ']' => return true,
                '\\' => index += 2,
                _ => index += 1,
            }
        }
        false
    }

    fn expect(&mut self, expected: char) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).map(|(_, ch)| *ch)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn current_byte_index(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(idx, _)| *idx)
            .unwrap_or_else(|| self.pattern.len())
    }

    fn consume_escape_char(&mut self) -> PatternResult<char> {
        let escape_index = self.current_byte_index();
        self.expect('\\');
        match self.next() {
            Some(ch) => Ok(ch),
            None => Err(PatternError::LoneEscapeCharacter {
                pattern: self.pattern.to_string(),
                index: escape_index,
            }),
        }
    }
}
