//! In-flight request key.

use std::fmt;

/// Identity of one translation request: `source:target:text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub source: String,
    pub target: String,
    pub text: String,
}

impl RequestKey {
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.target, self.text)
    }
}
