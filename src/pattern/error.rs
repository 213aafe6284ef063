use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern '{pattern}' has an unterminated character class starting at byte {start}")]
    UnterminatedClass { pattern: String, start: usize },
    #[error("pattern '{pattern}' has an unterminated alternation starting at byte {start}")]
    UnterminatedAlternation { pattern: String, start: usize },
    #[error("pattern '{pattern}' has an empty character class at byte {start}")]
    EmptyClass { pattern: String, start: usize },
    #[error("pattern '{pattern}' has an inverted range '{start}-{end}' at byte {index}")]
    InvertedRange {
        pattern: String,
        index: usize,
        start: char,
        end: char,
    },
    #[error("pattern '{pattern}' ends with a lone escape character at byte {index}")]
    LoneEscapeCharacter { pattern: String, index: usize },
    #[error("pattern '{pattern}' nests alternations deeper than {limit} levels at byte {start}")]
    NestingTooDeep {
        pattern: String,
        start: usize,
        limit: usize,
    },
}

impl PatternError {
    /// Name of the construct the error points at.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnterminatedClass { .. } | Self::EmptyClass { .. } => "class",
            Self::UnterminatedAlternation { .. } | Self::NestingTooDeep { .. } => "alternation",
            Self::InvertedRange { .. } => "range",
            Self::LoneEscapeCharacter { .. } => "escape",
        }
    }

    /// Byte offset of the offending construct within the pattern.
    pub fn offset(&self) -> usize {
        match self {
            Self::UnterminatedClass { start, .. }
            | Self::UnterminatedAlternation { start, .. }
            | Self::EmptyClass { start, .. }
            | Self::NestingTooDeep { start, .. } => *start,
            Self::InvertedRange { index, .. } | Self::LoneEscapeCharacter { index, .. } => *index,
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            Self::UnterminatedClass { pattern, .. }
            | Self::UnterminatedAlternation { pattern, .. }
            | Self::EmptyClass { pattern, .. }
            | Self::InvertedRange { pattern, .. }
            | Self::LoneEscapeCharacter { pattern, .. }
            | Self::NestingTooDeep { pattern, .. } => pattern,
        }
    }
}

pub type PatternResult<T> = Result<T, PatternError>;
