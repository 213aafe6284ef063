//! Shell-style glob patterns compiled into reusable matchers.
//!
//! Supported syntax:
//! - `*` any run of characters that does not cross the separator
//! - `**` any run of characters, separator included
//! - `?` exactly one character other than the separator
//! - `[abc]`, `[a-z]`, `[!...]`, `[^...]` character classes
//! - `{a,b,c}` alternation of full subpatterns, nestable
//! - `\X` the literal character `X`
//!
//! ```
//! let go_files = bunner_glob_rs::compile("**/*.go", Some('/')).unwrap();
//! assert!(go_files.matches("src/utils/helper.go"));
//! assert!(!go_files.matches("main.js"));
//! ```

mod cache;
mod escape;
mod options;
pub mod pattern;

pub use cache::PatternCache;
pub use escape::{META_CHARS, escape_meta, is_meta_char};
pub use options::{DEFAULT_CACHE_CAPACITY, GlobOptions, GlobOptionsBuilder};
pub use pattern::{
    CompiledPattern, FastPath, MAX_ALTERNATION_DEPTH, PatternError, PatternResult,
};

/// Compiles `pattern`, treating `separator` (if any) as the code point bounded wildcards may not cross.
pub fn compile(pattern: &str, separator: Option<char>) -> PatternResult<CompiledPattern> {
    CompiledPattern::new(pattern, separator)
}

pub fn compile_with_options(pattern: &str, options: &GlobOptions) -> PatternResult<CompiledPattern> {
    CompiledPattern::new(pattern, options.separator)
}

/// One-shot match without a separator. Recompiles on every call; keep a
/// [`CompiledPattern`] or a [`PatternCache`] around for repeated use.
pub fn match_once(pattern: &str, input: &str) -> PatternResult<bool> {
    Ok(compile(pattern, None)?.matches(input))
}
