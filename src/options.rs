use serde::{Deserialize, Serialize};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct GlobOptions {
    pub separator: Option<char>,
}

impl GlobOptions {
    pub fn builder() -> GlobOptionsBuilder {
        GlobOptionsBuilder::default()
    }

    pub fn with_separator(separator: char) -> Self {
        Self {
            separator: Some(separator),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct GlobOptionsBuilder {
    options: GlobOptions,
}

impl GlobOptionsBuilder {
    pub fn separator(mut self, value: char) -> Self {
        self.options.separator = Some(value);
        self
    }

    pub fn no_separator(mut self) -> Self {
        self.options.separator = None;
        self
    }

    pub fn build(self) -> GlobOptions {
        self.options
    }
}
