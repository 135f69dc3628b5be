use crate::semantic::Rule;

/// Everything believed so far: the rules of each predicate, in the order they were assumed
///
/// Assuming a rule returns a new `Knowledge`. Searches started earlier keep the snapshot
/// they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Knowledge {
    rules: im::HashMap<String, im::Vector<Rule>>,
}

impl Knowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rule` after the rules already known for its predicate.
    pub fn assume(&self, rule: Rule) -> Knowledge {
        let name = rule.head.name.clone();
        let mut clauses = self.rules.get(&name).cloned().unwrap_or_default();
        clauses.push_back(rule);
        Knowledge {
            rules: self.rules.update(name, clauses),
        }
    }

    pub fn assume_many(&self, rules: impl IntoIterator<Item = Rule>) -> Knowledge {
        rules
            .into_iter()
            .fold(self.clone(), |knowledge, rule| knowledge.assume(rule))
    }

    /// Rules for `pred`, empty for a predicate never assumed
    pub fn rules(&self, pred: &str) -> im::Vector<Rule> {
        self.rules.get(pred).cloned().unwrap_or_default()
    }

    /// Names of every predicate with at least one rule, sorted
    pub fn predicates(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.keys().cloned().collect();
        names.sort();
        names
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.rules.values().map(|clauses| clauses.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
