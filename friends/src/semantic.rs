use crate::ast::{VarId, VarIdGenerator};
use crate::parser::tokens;
use std::fmt;

/// Name of the atom that terminates proper lists
pub const NIL_ATOM: &str = "なし";

/// Built-in predicate that always succeeds once
pub const TRUE_PRED: &str = "ほんとう";

/// Built-in predicate that succeeds once and prunes the enclosing choice point
pub const CUT_PRED: &str = "カット";

/// A logic variable: a source name plus the instantiation it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var {
    pub id: VarId,
    pub name: String,
}

impl Var {
    pub fn new(name: impl Into<String>, id: VarId) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// A variable as written in source, before any renaming
    pub fn source(name: impl Into<String>) -> Self {
        Self::new(name, VarId::SOURCE)
    }
}

/// A term: the objects propositions talk about
///
/// Every walk over a term, `Clone` and `Drop` included, keeps its own work stack: a list may
/// be as long as the source allows.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Var(Var),
    Atom(String),
    /// `arg の functor`
    App { functor: String, arg: Box<Term> },
    /// `head と tail`
    Cons { head: Box<Term>, tail: Box<Term> },
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(Var::source(name))
    }

    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    pub fn app(functor: impl Into<String>, arg: Term) -> Self {
        Term::App {
            functor: functor.into(),
            arg: Box::new(arg),
        }
    }

    pub fn cons(head: Term, tail: Term) -> Self {
        Term::Cons {
            head: Box::new(head),
            tail: Box::new(tail),
        }
    }

    pub fn nil() -> Self {
        Term::Atom(NIL_ATOM.to_string())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Atom(name) if name == NIL_ATOM)
    }

    /// Right-folds `items` into cons cells ending in `tail`, or in `Nil` when no tail is given.
    pub fn list(items: Vec<Term>, tail: Option<Term>) -> Self {
        items
            .into_iter()
            .rev()
            .fold(tail.unwrap_or_else(Term::nil), |acc, item| {
                Term::cons(item, acc)
            })
    }

    /// Appends every variable occurrence to `out`, left to right, duplicates included.
    pub fn collect_vars(&self, out: &mut Vec<Var>) {
        let mut pending = vec![self];
        while let Some(term) = pending.pop() {
            match term {
                Term::Var(v) => out.push(v.clone()),
                Term::Atom(_) => {}
                Term::App { arg, .. } => pending.push(arg),
                Term::Cons { head, tail } => {
                    pending.push(tail);
                    pending.push(head);
                }
            }
        }
    }

    pub fn vars(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    /// Renames every variable of the term to instantiation `id`.
    pub fn with_var_id(&self, id: VarId) -> Term {
        self.rebuild(|leaf| match leaf {
            Term::Var(v) => Leaf::Replace(Term::Var(Var::new(v.name.clone(), id))),
            other => Leaf::Replace(other.clone()),
        })
    }

    /// Copies the term bottom-up, asking `leaf` what each variable and atom becomes.
    pub(crate) fn rebuild<'a>(&'a self, mut leaf: impl FnMut(&'a Term) -> Leaf<'a>) -> Term {
        enum Work<'a> {
            Visit(&'a Term),
            App(&'a str),
            Cons,
        }

        let mut work = vec![Work::Visit(self)];
        let mut built: Vec<Term> = Vec::new();
        while let Some(item) = work.pop() {
            match item {
                Work::Visit(term) => match term {
                    Term::Var(_) | Term::Atom(_) => match leaf(term) {
                        Leaf::Replace(replacement) => built.push(replacement),
                        Leaf::Follow(next) => work.push(Work::Visit(next)),
                    },
                    Term::App { functor, arg } => {
                        work.push(Work::App(functor));
                        work.push(Work::Visit(arg));
                    }
                    Term::Cons { head, tail } => {
                        work.push(Work::Cons);
                        work.push(Work::Visit(tail));
                        work.push(Work::Visit(head));
                    }
                },
                Work::App(functor) => {
                    let arg = pop_built(&mut built);
                    built.push(Term::app(functor, arg));
                }
                Work::Cons => {
                    let tail = pop_built(&mut built);
                    let head = pop_built(&mut built);
                    built.push(Term::cons(head, tail));
                }
            }
        }
        pop_built(&mut built)
    }

    /// Moves the term out, leaving an empty atom behind.
    pub(crate) fn detach(&mut self) -> Term {
        std::mem::replace(self, Term::Atom(String::new()))
    }

    fn detach_children(&mut self, out: &mut Vec<Term>) {
        match self {
            Term::Var(_) | Term::Atom(_) => {}
            Term::App { arg, .. } => out.push(arg.detach()),
            Term::Cons { head, tail } => {
                out.push(head.detach());
                out.push(tail.detach());
            }
        }
    }
}

/// What `Term::rebuild` puts in place of a variable or atom
pub(crate) enum Leaf<'a> {
    /// This term, as is
    Replace(Term),
    /// The rebuilt copy of this term
    Follow(&'a Term),
}

fn pop_built(built: &mut Vec<Term>) -> Term {
    match built.pop() {
        Some(term) => term,
        None => unreachable!("term rebuilt from an unbalanced work list"),
    }
}

impl Clone for Term {
    fn clone(&self) -> Self {
        match self {
            Term::Var(v) => Term::Var(v.clone()),
            Term::Atom(name) => Term::Atom(name.clone()),
            compound => compound.rebuild(|leaf| {
                Leaf::Replace(match leaf {
                    Term::Var(v) => Term::Var(v.clone()),
                    Term::Atom(name) => Term::Atom(name.clone()),
                    _ => unreachable!("only variables and atoms are leaves"),
                })
            }),
        }
    }
}

impl Drop for Term {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut term) = pending.pop() {
            term.detach_children(&mut pending);
        }
    }
}

/// Atomic proposition: `term は name フレンズ`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pred {
    pub name: String,
    pub term: Term,
}

impl Pred {
    pub fn new(name: impl Into<String>, term: Term) -> Self {
        Self {
            name: name.into(),
            term,
        }
    }

    pub fn is_cut(&self) -> bool {
        self.name == CUT_PRED && self.term.is_nil()
    }

    pub fn is_true(&self) -> bool {
        self.name == TRUE_PRED && self.term.is_nil()
    }

    pub fn with_var_id(&self, id: VarId) -> Pred {
        Pred::new(self.name.clone(), self.term.with_var_id(id))
    }
}

/// A proposition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Prop {
    Pred(Pred),
    Conj(Box<Prop>, Box<Prop>),
}

impl Prop {
    pub fn pred(name: impl Into<String>, term: Term) -> Self {
        Prop::Pred(Pred::new(name, term))
    }

    pub fn conj(left: Prop, right: Prop) -> Self {
        Prop::Conj(Box::new(left), Box::new(right))
    }

    /// `[p, q, r]` becomes `p で (q で r)`. Returns `None` for an empty list.
    pub fn conj_all(props: Vec<Prop>) -> Option<Prop> {
        props
            .into_iter()
            .rev()
            .reduce(|right, left| Prop::conj(left, right))
    }

    pub fn cut() -> Self {
        Prop::pred(CUT_PRED, Term::nil())
    }

    pub fn truth() -> Self {
        Prop::pred(TRUE_PRED, Term::nil())
    }

    pub fn collect_vars(&self, out: &mut Vec<Var>) {
        match self {
            Prop::Pred(pred) => pred.term.collect_vars(out),
            Prop::Conj(left, right) => {
                left.collect_vars(out);
                right.collect_vars(out);
            }
        }
    }

    pub fn vars(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    pub fn with_var_id(&self, id: VarId) -> Prop {
        match self {
            Prop::Pred(pred) => Prop::Pred(pred.with_var_id(id)),
            Prop::Conj(left, right) => Prop::conj(left.with_var_id(id), right.with_var_id(id)),
        }
    }
}

/// An axiom (no goal) or an inference rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub head: Pred,
    pub goal: Option<Prop>,
}

impl Rule {
    pub fn fact(head: Pred) -> Self {
        Self { head, goal: None }
    }

    pub fn new(head: Pred, goal: Prop) -> Self {
        Self {
            head,
            goal: Some(goal),
        }
    }

    /// Copy of the rule whose variables all belong to a fresh instantiation
    pub fn refresh(&self, ids: &VarIdGenerator) -> Rule {
        let id = ids.next_id();
        Rule {
            head: self.head.with_var_id(id),
            goal: self.goal.as_ref().map(|goal| goal.with_var_id(id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    pub prop: Prop,
}

/// One parsed input: something to believe or something to ask
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Rule(Rule),
    Query(Query),
}

fn write_grouped(f: &mut fmt::Formatter<'_>, term: &Term) -> fmt::Result {
    write!(f, "{}{}{}", tokens::GROUP_OPEN, term, tokens::GROUP_CLOSE)
}

fn write_list(f: &mut fmt::Formatter<'_>, head: &Term, tail: &Term) -> fmt::Result {
    let mut rest = Vec::new();
    let mut end = tail;
    while let Term::Cons { head, tail } = end {
        rest.push(head.as_ref());
        end = tail.as_ref();
    }

    match head {
        Term::Cons { .. } => write_grouped(f, head)?,
        _ => write!(f, "{}", head)?,
    }

    // `x と なし とか` for a lone element.
    let open_tail = if end.is_nil() && !rest.is_empty() {
        None
    } else {
        Some(end)
    };
    for element in rest.into_iter().chain(open_tail) {
        write!(f, " {} ", tokens::CONS)?;
        match element {
            Term::Cons { .. } | Term::App { .. } => write_grouped(f, element)?,
            _ => write!(f, "{}", element)?,
        }
    }

    if open_tail.is_some() {
        write!(f, " {}", tokens::TAIL)?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(v) => write!(f, "{}", v.name),
            Term::Atom(name) => write!(f, "{}", name),
            Term::App { .. } => {
                let mut functors = Vec::new();
                let mut base = self;
                while let Term::App { functor, arg } = base {
                    functors.push(functor);
                    base = arg.as_ref();
                }
                match base {
                    Term::Cons { .. } => write_grouped(f, base)?,
                    _ => write!(f, "{}", base)?,
                }
                for functor in functors.iter().rev() {
                    write!(f, " {} {}", tokens::OF, functor)?;
                }
                Ok(())
            }
            Term::Cons { head, tail } => write_list(f, head, tail),
        }
    }
}

impl fmt::Display for Pred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.term,
            tokens::SUBJECT_MARKERS[0],
            self.name,
            tokens::TYPE_MARK
        )
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Pred(pred) => write!(f, "{}", pred),
            Prop::Conj(left, right) => write!(f, "{} {} {}", left, tokens::AND, right),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", tokens::RULE_MARK)?;
        if let Some(goal) = &self.goal {
            write!(f, "{} {} ", goal, tokens::IF)?;
        }
        write!(f, "{} {}", self.head, tokens::AXIOM_MARK)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prop, tokens::QUERY_MARKS[0])
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Rule(rule) => write!(f, "{}", rule),
            Statement::Query(query) => write!(f, "{}", query),
        }
    }
}
