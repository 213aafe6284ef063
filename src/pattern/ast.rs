use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq)]
pub struct PatternAst {
    pub nodes: Vec<PatternNode>,
}

impl PatternAst {
    pub fn new(nodes: Vec<PatternNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    Literal(String),
    AnyOne,
    AnyRun,
    AnyRunUnbounded,
    Class(ClassNode),
    Alternation(AlternationNode),
}

impl PatternNode {
    pub fn is_run(&self) -> bool {
        matches!(self, Self::AnyRun | Self::AnyRunUnbounded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRange {
    pub start: char,
    pub end: char,
}

impl ClassRange {
    pub fn single(ch: char) -> Self {
        Self { start: ch, end: ch }
    }

    pub fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.start <= ch && ch <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub ranges: SmallVec<[ClassRange; 4]>,
    pub negated: bool,
}

impl ClassNode {
    pub fn new(ranges: SmallVec<[ClassRange; 4]>, negated: bool) -> Self {
        debug_assert!(!ranges.is_empty());
        Self { ranges, negated }
    }

    #[inline]
    pub fn matches(&self, ch: char) -> bool {
        self.ranges.iter().any(|range| range.contains(ch)) != self.negated
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternationNode {
    pub branches: Vec<Vec<PatternNode>>,
}

impl AlternationNode {
    pub fn new(branches: Vec<Vec<PatternNode>>) -> Self {
        debug_assert!(!branches.is_empty());
        Self { branches }
    }
}
