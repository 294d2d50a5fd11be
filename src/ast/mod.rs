//! Abstract Syntax Tree (AST) definitions for Barq and Cerium.
//!
//! Every node owns its children; the tree is rooted at [`Module`]. Nodes are
//! built bottom-up in a single pass and never mutated afterwards. The variant
//! and field layout is what formatters and analyzers match on, so it is kept
//! stable and serialisable.

use serde::{Deserialize, Serialize};

mod declarations;
mod expressions;
mod module;
mod statements;
mod types;

pub use declarations::*;
pub use expressions::*;
pub use module::*;
pub use statements::*;
pub use types::*;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
