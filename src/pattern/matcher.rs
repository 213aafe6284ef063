use hashbrown::HashSet as FastHashSet;
use memchr::{memchr, memmem};
use smallvec::SmallVec;

use super::ast::{ClassNode, PatternNode};
use super::compiled::CompiledPattern;
use super::optimizer::FastPath;

type SequenceId = u32;
type StepIndex = u32;
type StateKey = (SequenceId, StepIndex, usize);

// Every alternation branch owns its own sequence, so the place matching resumes
// after a branch is fixed at lowering time. That makes (sequence, step, position)
// a complete description of the remaining work.
#[derive(Debug, Clone)]
pub(crate) struct Program {
    sequences: Vec<Sequence>,
}

#[derive(Debug, Clone)]
struct Sequence {
    steps: Vec<Step>,
    resume: Option<Resume>,
}

#[derive(Debug, Clone, Copy)]
struct Resume {
    sequence: SequenceId,
    step: StepIndex,
}

#[derive(Debug, Clone)]
enum Step {
    Literal(Box<str>),
    AnyOne,
    AnyRun,
    AnyRunUnbounded,
    Class(ClassNode),
    Alternation(SmallVec<[SequenceId; 4]>),
}

impl Program {
    pub(crate) fn lower(nodes: &[PatternNode]) -> Self {
        let mut program = Program {
            sequences: Vec::new(),
        };
        program.lower_sequence(nodes, None);
        program
    }

    pub(crate) fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    fn lower_sequence(&mut self, nodes: &[PatternNode], resume: Option<Resume>) -> SequenceId {
        let id = self.sequences.len() as SequenceId;
        self.sequences.push(Sequence {
            steps: Vec::with_capacity(nodes.len()),
            resume,
        });

        for (idx, node) in nodes.iter().enumerate() {
            let step = match node {
                PatternNode::Literal(text) => Step::Literal(text.as_str().into()),
                PatternNode::AnyOne => Step::AnyOne,
                PatternNode::AnyRun => Step::AnyRun,
                PatternNode::AnyRunUnbounded => Step::AnyRunUnbounded,
                PatternNode::Class(class) => Step::Class(class.clone()),
                PatternNode::Alternation(alt) => {
                    let after = Resume {
                        sequence: id,
                        step: idx as StepIndex + 1,
                    };
                    Step::Alternation(
                        alt.branches
                            .iter()
                            .map(|branch| self.lower_sequence(branch, Some(after)))
                            .collect(),
                    )
                }
            };
            self.sequences[id as usize].steps.push(step);
        }

        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Separator {
    ch: char,
    buf: [u8; 4],
    len: usize,
}

impl Separator {
    pub(crate) fn new(ch: char) -> Self {
        let mut buf = [0u8; 4];
        let len = ch.encode_utf8(&mut buf).len();
        Self { ch, buf, len }
    }

    #[inline]
    fn find(&self, haystack: &[u8]) -> Option<usize> {
        if self.len == 1 {
            memchr(self.buf[0], haystack)
        } else {
            memmem::find(haystack, &self.buf[..self.len])
        }
    }
}

#[inline]
fn contains_separator(text: &str, separator: Option<Separator>) -> bool {
    separator.is_some_and(|sep| sep.find(text.as_bytes()).is_some())
}

pub fn match_pattern(pattern: &CompiledPattern, input: &str) -> bool {
    let separator = pattern.separator().map(Separator::new);

    let shortcut = match (pattern.fast_path(), pattern.nodes()) {
        (FastPath::Exact, [PatternNode::Literal(lit)]) => Some(input == lit),
        (FastPath::PrefixOnly, [PatternNode::Literal(lit), PatternNode::AnyRun]) => Some(
            input
                .strip_prefix(lit.as_str())
                .is_some_and(|rest| !contains_separator(rest, separator)),
        ),
        (FastPath::SuffixOnly, [PatternNode::AnyRun, PatternNode::Literal(lit)]) => Some(
            input
                .strip_suffix(lit.as_str())
                .is_some_and(|head| !contains_separator(head, separator)),
        ),
        _ => None,
    };

    if let Some(decided) = shortcut {
        tracing::event!(
            tracing::Level::TRACE,
            operation = "match",
            fast_path = %pattern.fast_path(),
            input_len = input.len() as u64,
            decided = decided
        );
        return decided;
    }

    let mut engine = Engine::new(pattern.program(), input, separator);
    let decided = engine.run();
    tracing::event!(
        tracing::Level::TRACE,
        operation = "match",
        fast_path = %FastPath::General,
        input_len = input.len() as u64,
        states = engine.visited.len() as u64,
        decided = decided
    );
    decided
}

// Acceptance is reachability of the final state, so the search keeps its own
// stack of pending states and a visited set instead of recursing. A state seen
// before has either already been expanded without reaching acceptance or is
// still pending, so it is never expanded twice.
struct Engine<'p, 'i> {
    program: &'p Program,
    input: &'i str,
    separator: Option<Separator>,
    pending: Vec<StateKey>,
    visited: FastHashSet<StateKey>,
}

impl<'p, 'i> Engine<'p, 'i> {
    fn new(program: &'p Program, input: &'i str, separator: Option<Separator>) -> Self {
        Self {
            program,
            input,
            separator,
            pending: Vec::new(),
            visited: FastHashSet::new(),
        }
    }

    fn run(&mut self) -> bool {
        self.pending.push((0, 0, 0));
        while let Some(state) = self.pending.pop() {
            if !self.visited.insert(state) {
                continue;
            }
            if self.expand(state) {
                return true;
            }
        }
        false
    }

    /// Queues the successors of `state`; true when `state` itself accepts.
    fn expand(&mut self, (sequence, idx, pos): StateKey) -> bool {
        let program = self.program;
        let input = self.input;
        let current = &program.sequences[sequence as usize];

        let Some(step) = current.steps.get(idx as usize) else {
            return match current.resume {
                Some(resume) => {
                    self.pending.push((resume.sequence, resume.step, pos));
                    false
                }
                None => pos == input.len(),
            };
        };

        let rest = &input[pos..];
        let next = idx + 1;
        match step {
            Step::Literal(lit) => {
                if rest.starts_with(&**lit) {
                    self.pending.push((sequence, next, pos + lit.len()));
                }
            }
            Step::AnyOne => {
                if let Some(ch) = rest.chars().next()
                    && !self.is_separator(ch)
                {
                    self.pending.push((sequence, next, pos + ch.len_utf8()));
                }
            }
            Step::Class(class) => {
                if let Some(ch) = rest.chars().next()
                    && class.matches(ch)
                {
                    self.pending.push((sequence, next, pos + ch.len_utf8()));
                }
            }
            Step::AnyRun => self.queue_run(sequence, idx, pos, true),
            Step::AnyRunUnbounded => self.queue_run(sequence, idx, pos, false),
            Step::Alternation(branches) => {
                for &branch in branches.iter().rev() {
                    self.pending.push((branch, 0, pos));
                }
            }
        }
        false
    }

    // Pushed shortest first so the longest candidate is popped first.
    fn queue_run(&mut self, sequence: SequenceId, idx: StepIndex, pos: usize, bounded: bool) {
        let program = self.program;
        let input = self.input;
        let rest = &input[pos..];
        let limit = match self.separator {
            Some(sep) if bounded => sep.find(rest.as_bytes()).unwrap_or(rest.len()),
            _ => rest.len(),
        };
        let next = idx + 1;

        if let Some(Step::Literal(lit)) = program.sequences[sequence as usize]
            .steps
            .get(next as usize)
        {
            // Only offsets where the following literal occurs can succeed.
            let needle = lit.as_bytes();
            let mut offsets: SmallVec<[usize; 8]> = SmallVec::new();
            let mut end = (limit + needle.len()).min(rest.len());
            while let Some(offset) = memmem::rfind(&rest.as_bytes()[..end], needle) {
                offsets.push(offset);
                if offset == 0 {
                    break;
                }
                end = offset + needle.len() - 1;
            }
            for offset in offsets.into_iter().rev() {
                self.pending.push((sequence, next, pos + offset));
            }
            return;
        }

        for (offset, _) in rest[..limit].char_indices() {
            self.pending.push((sequence, next, pos + offset));
        }
        self.pending.push((sequence, next, pos + limit));
    }

    #[inline]
    fn is_separator(&self, ch: char) -> bool {
        self.separator.is_some_and(|sep| sep.ch == ch)
    }
}
