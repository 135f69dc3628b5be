//! Variable bindings and unification
//!
//! An `Env` is a persistent map: binding returns a new environment and leaves the old one
//! usable, which is what lets every open branch of a proof search keep its own bindings.

use crate::semantic::{Leaf, Term, Var};
use std::borrow::Cow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    bindings: im::HashMap<Var, Term>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    /// The term `var` is directly bound to, if any
    pub fn get(&self, var: &Var) -> Option<&Term> {
        self.bindings.get(var)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Binds `var` to `term` as seen through this environment.
    ///
    /// Binding a variable to itself leaves the environment as it is. Deeper cycles such as
    /// `X = X の f` are not detected.
    pub fn bind(&self, var: &Var, term: &Term) -> Env {
        let term = self.substitute(term);
        if matches!(&term, Term::Var(v) if v == var) {
            return self.clone();
        }
        Env {
            bindings: self.bindings.update(var.clone(), term),
        }
    }

    /// Replaces bound variables by their values, all the way down.
    pub fn substitute<'a>(&'a self, term: &'a Term) -> Term {
        term.rebuild(|leaf| match leaf {
            Term::Var(var) => match self.bindings.get(var) {
                Some(bound) => Leaf::Follow(bound),
                None => Leaf::Replace(leaf.clone()),
            },
            _ => Leaf::Replace(leaf.clone()),
        })
    }

    /// Extends this environment so that `left` and `right` become equal, if possible.
    ///
    /// Pairs still to be unified are kept on a work list, heads before tails.
    pub fn unify(&self, left: &Term, right: &Term) -> Option<Env> {
        let mut env = self.clone();
        let mut pending: Vec<(Cow<'_, Term>, Cow<'_, Term>)> =
            vec![(Cow::Borrowed(left), Cow::Borrowed(right))];

        while let Some((left, right)) = pending.pop() {
            if let Term::Var(var) = left.as_ref() {
                let var = var.clone();
                env = env.unify_var(&var, right, &mut pending);
                continue;
            }
            if let Term::Var(var) = right.as_ref() {
                let var = var.clone();
                env = env.unify_var(&var, left, &mut pending);
                continue;
            }

            let compatible = match (left.as_ref(), right.as_ref()) {
                (Term::Atom(a), Term::Atom(b)) => a == b,
                (Term::App { functor: f, .. }, Term::App { functor: g, .. }) => f == g,
                (Term::Cons { .. }, Term::Cons { .. }) => true,
                _ => false,
            };
            if !compatible {
                return None;
            }
            pending.extend(subterms(left).into_iter().zip(subterms(right)));
        }
        Some(env)
    }

    fn unify_var<'a>(
        &self,
        var: &Var,
        term: Cow<'a, Term>,
        pending: &mut Vec<(Cow<'a, Term>, Cow<'a, Term>)>,
    ) -> Env {
        match self.bindings.get(var) {
            Some(bound) => {
                pending.push((Cow::Owned(bound.clone()), term));
                self.clone()
            }
            None => self.bind(var, &term),
        }
    }
}

/// Direct subterms in reverse order, so the head is popped off a work list first.
/// Borrowed terms stay borrowed.
fn subterms(term: Cow<'_, Term>) -> Vec<Cow<'_, Term>> {
    match term {
        Cow::Borrowed(term) => match term {
            Term::Var(_) | Term::Atom(_) => Vec::new(),
            Term::App { arg, .. } => vec![Cow::Borrowed(arg.as_ref())],
            Term::Cons { head, tail } => {
                vec![Cow::Borrowed(tail.as_ref()), Cow::Borrowed(head.as_ref())]
            }
        },
        Cow::Owned(mut term) => match &mut term {
            Term::Var(_) | Term::Atom(_) => Vec::new(),
            Term::App { arg, .. } => vec![Cow::Owned(arg.detach())],
            Term::Cons { head, tail } => {
                vec![Cow::Owned(tail.detach()), Cow::Owned(head.detach())]
            }
        },
    }
}
