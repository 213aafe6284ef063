pub mod analysis;
mod ast;
mod compiled;
mod error;
mod matcher;
mod optimizer;
mod parser;

pub use analysis::{PatternAnalysis, analyze};
pub use ast::{AlternationNode, ClassNode, ClassRange, PatternAst, PatternNode};
pub use compiled::CompiledPattern;
pub use error::{PatternError, PatternResult};
pub use matcher::match_pattern;
pub use optimizer::{FastPath, optimize};
pub use parser::{MAX_ALTERNATION_DEPTH, parse_pattern};
