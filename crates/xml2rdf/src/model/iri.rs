//! Node identifier allocation for converted elements.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use uuid::Uuid;

use super::vocabulary::BLANK_NODE_PREFIX;

/// Characters that need percent-encoding when an attribute value becomes
/// part of an IRI. We keep alphanumeric, -, _, ., ~ as unreserved per RFC 3987.
const IRI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// How fresh node identifiers are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `_:n0`, `_:n1`, ... unique within one document.
    #[default]
    Sequential,
    /// `<namespace><uuid-v4>`, unique across documents.
    RandomUnique,
}

/// Turns an attribute value into a node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IdTransform {
    /// Use the attribute value unchanged.
    Verbatim,
    /// Prepend `prefix` to the percent-encoded attribute value.
    Prefix { prefix: String },
}

impl IdTransform {
    pub fn apply(&self, value: &str) -> String {
        match self {
            IdTransform::Verbatim => value.to_string(),
            IdTransform::Prefix { prefix } => format!("{prefix}{}", escape(value)),
        }
    }
}

/// Escape a string for use in an IRI path segment.
pub fn escape(value: &str) -> String {
    utf8_percent_encode(value, IRI_ENCODE_SET).to_string()
}

/// Allocates one identifier per element. Owned by a single converter, so the
/// sequential counter restarts only with a fresh instance.
#[derive(Debug)]
pub struct IdAllocator {
    strategy: IdStrategy,
    counter: u64,
}

impl IdAllocator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            counter: 0,
        }
    }

    /// Next identifier. `namespace` is only used by the random strategy.
    pub fn allocate(&mut self, namespace: &str) -> String {
        match self.strategy {
            IdStrategy::Sequential => {
                let id = format!("{BLANK_NODE_PREFIX}{}", self.counter);
                self.counter += 1;
                id
            }
            IdStrategy::RandomUnique => format!("{namespace}{}", Uuid::new_v4()),
        }
    }

    /// Number of sequential labels handed out so far.
    pub fn allocated(&self) -> u64 {
        self.counter
    }
}
