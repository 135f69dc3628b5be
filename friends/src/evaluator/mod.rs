//! Proof search for Friends
//!
//! Answers a query by:
//! 1. Renaming its variables to a fresh instantiation
//! 2. Resolving it against the knowledge, one clause at a time, in declaration order
//! 3. Reading every query variable back out of each environment that proves it

pub mod budget;
pub mod env;
pub mod knowledge;
pub mod search;

use crate::ast::VarIdGenerator;
use crate::response::Solutions;
use crate::semantic::{Prop, Var};
use env::Env;
use knowledge::Knowledge;
use search::Search;

/// Lazily proves `prop` from `env` and `knowledge`.
///
/// Solutions list the query's variables by name in order of first occurrence. Later
/// changes to the caller's knowledge do not affect the returned sequence.
pub fn query(prop: &Prop, env: &Env, knowledge: &Knowledge, ids: &VarIdGenerator) -> Solutions {
    let id = ids.next_id();
    let goal = prop.with_var_id(id);

    let mut tracked: Vec<Var> = Vec::new();
    for var in prop.vars() {
        if !tracked.iter().any(|seen| seen.name == var.name) {
            tracked.push(Var::new(var.name, id));
        }
    }

    let search = Search::new(&goal, env.clone(), knowledge.clone(), ids.clone());
    Solutions::new(search, tracked)
}
