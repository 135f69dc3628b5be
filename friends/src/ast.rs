//! AST infrastructure types
//!
//! This module contains metadata types used throughout the parser and the engine:
//! - `Position` and `Span` for tracking source code locations
//! - `VarId` for telling apart instantiations of the same source variable
//! - `VarIdGenerator` for handing out fresh ids during proof search

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A point in source text. All fields are 0-based; `index` is a byte offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

/// Span representing a location in source code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// 1-based
    pub line: usize,
    /// 1-based
    pub col: usize,
}

impl Span {
    /// A span covering `len` bytes from `pos`
    pub fn from_position(pos: Position, len: usize) -> Self {
        Self {
            start: pos.index,
            end: pos.index + len,
            line: pos.line + 1,
            col: pos.column + 1,
        }
    }
}

/// Instantiation id of a variable
///
/// Variables written in source carry `VarId::SOURCE`. Every time a rule or query is
/// used for proof search its variables are renamed to a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(u64);

impl VarId {
    pub const SOURCE: VarId = VarId(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Counter for generating fresh variable ids
///
/// Clones share one counter, so a session and all the searches it starts never hand
/// out the same id twice.
#[derive(Debug, Clone)]
pub struct VarIdGenerator {
    next_id: Arc<AtomicU64>,
}

impl Default for VarIdGenerator {
    fn default() -> Self {
        Self {
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl VarIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> VarId {
        VarId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}
