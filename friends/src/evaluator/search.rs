//! SLD resolution as an explicit, resumable machine
//!
//! The search keeps a list of goals still to prove and a stack of choice points. Each choice
//! point remembers a predicate call and which of its rules to try next, so backtracking is
//! popping the stack and resuming the topmost call. Nothing is explored beyond the next
//! solution until the caller asks again.
//!
//! A cut pops every choice point created since the call of the predicate whose body it
//! appears in, that call included. Goals to its right still run and may produce several
//! solutions. A cut in the query itself commits to the first way of proving what precedes it.

use super::budget::SearchBudget;
use super::env::Env;
use super::knowledge::Knowledge;
use crate::ast::VarIdGenerator;
use crate::error::FriendsError;
use crate::semantic::{Pred, Prop, Rule};
use std::sync::Arc;

/// Goals left to prove, innermost first. Shared between the search and its choice points.
type Goals = Option<Arc<Goal>>;

#[derive(Debug)]
struct Goal {
    pred: Pred,
    /// Height the choice-point stack is cut back to when this goal is a cut
    cut_barrier: usize,
    next: Goals,
}

/// Pushes `prop` in front of `next`, leftmost conjunct first.
fn push_prop(prop: &Prop, cut_barrier: usize, next: Goals) -> Goals {
    match prop {
        Prop::Pred(pred) => Some(Arc::new(Goal {
            pred: pred.clone(),
            cut_barrier,
            next,
        })),
        Prop::Conj(left, right) => {
            let next = push_prop(right, cut_barrier, next);
            push_prop(left, cut_barrier, next)
        }
    }
}

/// A predicate call with rules left to try
#[derive(Debug)]
struct ChoicePoint {
    goal: Pred,
    env: Env,
    rules: im::Vector<Rule>,
    next_rule: usize,
    continuation: Goals,
}

/// Outcome of one unit of work
#[derive(Debug)]
pub enum Step {
    Solved(Env),
    Continue,
    Exhausted,
}

#[derive(Debug)]
pub struct Search {
    knowledge: Knowledge,
    ids: VarIdGenerator,
    /// Where to continue forward; `None` means backtrack.
    current: Option<(Env, Goals)>,
    stack: Vec<ChoicePoint>,
    steps: u64,
}

impl Search {
    /// A search proving `goal` from `env`. Its variables should already be fresh.
    pub fn new(goal: &Prop, env: Env, knowledge: Knowledge, ids: VarIdGenerator) -> Self {
        Self {
            knowledge,
            ids,
            current: Some((env, push_prop(goal, 0, None))),
            stack: Vec::new(),
            steps: 0,
        }
    }

    /// Steps performed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn step(&mut self) -> Step {
        self.steps += 1;
        match self.current.take() {
            Some((env, goals)) => self.advance(env, goals),
            None => self.resume(),
        }
    }

    /// Runs until the next solution, or returns `None` when there are no more.
    pub fn next_env(&mut self) -> Option<Env> {
        loop {
            match self.step() {
                Step::Solved(env) => return Some(env),
                Step::Continue => {}
                Step::Exhausted => return None,
            }
        }
    }

    /// Like `next_env`, charging every step to `budget`.
    pub fn next_env_within(
        &mut self,
        budget: &mut SearchBudget,
    ) -> Result<Option<Env>, FriendsError> {
        loop {
            budget.charge()?;
            match self.step() {
                Step::Solved(env) => return Ok(Some(env)),
                Step::Continue => {}
                Step::Exhausted => return Ok(None),
            }
        }
    }

    fn advance(&mut self, env: Env, goals: Goals) -> Step {
        let Some(goal) = goals else {
            return Step::Solved(env);
        };

        if goal.pred.is_true() {
            self.current = Some((env, goal.next.clone()));
        } else if goal.pred.is_cut() {
            self.stack.truncate(goal.cut_barrier);
            self.current = Some((env, goal.next.clone()));
        } else {
            let rules = self.knowledge.rules(&goal.pred.name);
            self.stack.push(ChoicePoint {
                goal: goal.pred.clone(),
                env,
                rules,
                next_rule: 0,
                continuation: goal.next.clone(),
            });
        }
        Step::Continue
    }

    /// Tries the next rule of the newest choice point.
    fn resume(&mut self) -> Step {
        let barrier = match self.stack.len().checked_sub(1) {
            Some(top) => top,
            None => return Step::Exhausted,
        };
        let point = &mut self.stack[barrier];

        let Some(rule) = point.rules.get(point.next_rule) else {
            self.stack.truncate(barrier);
            return Step::Continue;
        };
        let rule = rule.refresh(&self.ids);
        point.next_rule += 1;

        if let Some(env) = point.env.unify(&point.goal.term, &rule.head.term) {
            let goals = match &rule.goal {
                Some(body) => push_prop(body, barrier, point.continuation.clone()),
                None => point.continuation.clone(),
            };
            self.current = Some((env, goals));
        }
        Step::Continue
    }
}
