//! # Friends Engine
//!
//! **すごーい！ A logic language for friends**
//!
//! Friends is a small Horn-clause logic language written in a Japanese surface syntax.
//! Rules are believed, queries are answered by resolution, one solution at a time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use friends::{FriendsResult, Reply, Session};
//!
//! fn main() -> FriendsResult<()> {
//!     let mut session = Session::new();
//!
//!     session.input("すごーい！ あなた が ヒトの フレンズ なら あなた は 定命の フレンズ なんだね！")?;
//!     session.input("すごーい！ かばんちゃん は ヒトの フレンズ なんだね！")?;
//!
//!     if let Reply::Solutions(solutions) = session.input("だれ は 定命の フレンズ なんですか？")? {
//!         for solution in solutions {
//!             println!("{}", solution.describe());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Terms
//! Atoms such as `かばんちゃん`, variables such as `あなた` or `_x`, applications
//! `かばんちゃん の ともだち` and lists `a と b と c`.
//!
//! ### Rules
//! `すごーい！ ... なんだね！` states a fact, or with `なら` an inference: the propositions
//! before `なら` imply the one after it.
//!
//! ### Queries
//! `... なんですか？` asks for every way of proving a conjunction of propositions.
//! The built-ins `なし は カット フレンズ` (cut) and `なし は ほんとう フレンズ` (true) are
//! available everywhere.

pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod semantic;

pub use ast::{Position, Span, VarId, VarIdGenerator};
pub use engine::{Reply, Session};
pub use error::FriendsError;
pub use evaluator::budget::SearchBudget;
pub use evaluator::env::Env;
pub use evaluator::knowledge::Knowledge;
pub use evaluator::query;
pub use parser::{parse, parse_term, split_paragraphs, Paragraph};
pub use resource_limits::ResourceLimits;
pub use response::{Assignment, Solution, Solutions};
pub use semantic::*;

/// Result type for Friends operations
pub type FriendsResult<T> = Result<T, FriendsError>;

#[cfg(test)]
mod tests;
