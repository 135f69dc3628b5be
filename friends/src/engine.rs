use crate::ast::VarIdGenerator;
use crate::evaluator::env::Env;
use crate::evaluator::knowledge::Knowledge;
use crate::response::Solutions;
use crate::semantic::{Prop, Rule, Statement};
use crate::{evaluator, parse, FriendsResult, ResourceLimits};
use tracing::debug;

/// What became of one input statement
#[derive(Debug)]
pub enum Reply {
    /// A rule, now part of the knowledge
    Accepted,
    /// A query, with its solutions still to be computed
    Solutions(Solutions),
}

/// An interactive Friends session.
///
/// Feeds rules into its knowledge and answers queries against it. Every query is answered
/// from the knowledge as it was when the query was asked.
#[derive(Debug, Clone)]
pub struct Session {
    knowledge: Knowledge,
    env: Env,
    ids: VarIdGenerator,
    limits: ResourceLimits,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_limits(ResourceLimits::default())
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            knowledge: Knowledge::new(),
            env: Env::new(),
            ids: VarIdGenerator::new(),
            limits,
        }
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    pub fn assume(&mut self, rule: Rule) {
        debug!(rule = %rule, "assuming rule");
        self.knowledge = self.knowledge.assume(rule);
    }

    pub fn query(&self, prop: &Prop) -> Solutions {
        debug!(query = %prop, "starting query");
        evaluator::query(prop, &self.env, &self.knowledge, &self.ids)
    }

    /// Parses one statement and acts on it.
    ///
    /// Malformed input is reported as `FriendsError::Parse` and leaves the session as it was.
    pub fn input(&mut self, text: &str) -> FriendsResult<Reply> {
        match parse(text, &self.limits)? {
            Statement::Rule(rule) => {
                self.assume(rule);
                Ok(Reply::Accepted)
            }
            Statement::Query(query) => Ok(Reply::Solutions(self.query(&query.prop))),
        }
    }
}
