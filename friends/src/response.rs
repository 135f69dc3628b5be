use crate::evaluator::budget::SearchBudget;
use crate::evaluator::env::Env;
use crate::evaluator::search::Search;
use crate::semantic::{Term, Var};
use crate::FriendsResult;
use serde::{Serialize, Serializer};

/// Reply when a query has no (more) solutions
pub const NO_MORE_SOLUTIONS: &str = "解なしなのです";

/// Reply when the user is satisfied with a solution
pub const ENOUGH: &str = "このくらいは朝飯前なのです";

/// Reply for a solution that binds nothing
pub const PROVEN: &str = "そのようですね";

const SOLUTION_END: &str = "なのです";

/// What one query variable stands for in a solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub var_name: String,
    /// `None` when the variable is left free
    #[serde(serialize_with = "serialize_term")]
    pub term: Option<Term>,
}

fn serialize_term<S: Serializer>(term: &Option<Term>, serializer: S) -> Result<S::Ok, S::Error> {
    term.as_ref().map(Term::to_string).serialize(serializer)
}

/// One way of proving a query: an assignment per distinct query variable, in order of first
/// occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub assignments: Vec<Assignment>,
}

impl Solution {
    /// Reads `vars` out of a proving environment.
    pub fn from_env(env: &Env, vars: &[Var]) -> Self {
        let assignments = vars
            .iter()
            .map(|var| {
                let term = match env.substitute(&Term::Var(var.clone())) {
                    Term::Var(_) => None,
                    term => Some(term),
                };
                Assignment {
                    var_name: var.name.clone(),
                    term,
                }
            })
            .collect();
        Self { assignments }
    }

    /// The value of the variable written `var_name`, if it is bound
    pub fn get(&self, var_name: &str) -> Option<&Term> {
        self.assignments
            .iter()
            .find(|a| a.var_name == var_name)
            .and_then(|a| a.term.as_ref())
    }

    /// Bound variables only, in query order
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.assignments
            .iter()
            .filter_map(|a| a.term.as_ref().map(|term| (a.var_name.as_str(), term)))
    }

    /// The REPL's reading of the solution, one line per bound variable
    pub fn describe(&self) -> String {
        let mut lines: Vec<String> = self
            .bindings()
            .map(|(name, term)| format!("{} は {} 、", name, term))
            .collect();
        if lines.is_empty() {
            return PROVEN.to_string();
        }
        lines.push(SOLUTION_END.to_string());
        lines.join("\n")
    }
}

/// The solutions of one query, computed one at a time as they are requested
#[derive(Debug)]
pub struct Solutions {
    search: Search,
    vars: Vec<Var>,
}

impl Solutions {
    pub fn new(search: Search, vars: Vec<Var>) -> Self {
        Self { search, vars }
    }

    /// Names of the query's variables, in solution order
    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|var| var.name.as_str())
    }

    /// The next solution, charging the work to `budget`.
    ///
    /// Running out of budget is an error, but the search stays where it was: a later call
    /// with a fresh budget continues from the same point.
    pub fn next_within(&mut self, budget: &mut SearchBudget) -> FriendsResult<Option<Solution>> {
        let env = self.search.next_env_within(budget)?;
        Ok(env.map(|env| Solution::from_env(&env, &self.vars)))
    }

    /// Search steps spent so far
    pub fn steps(&self) -> u64 {
        self.search.steps()
    }
}

impl Iterator for Solutions {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        let env = self.search.next_env()?;
        Some(Solution::from_env(&env, &self.vars))
    }
}
