use crate::parser::combinator::{choice, expect, recursive, word, Parser};
use crate::parser::tokens::{
    blank, is_variable_name, keyword, CONS, GROUP_CLOSE, GROUP_OPEN, OF, TAIL,
};
use crate::semantic::{Term, Var};

/// term = atomic ("の" name)* ("と" atomic)* "とか"?
pub(crate) fn term() -> Parser<Term> {
    recursive(|term| {
        let group = expect(GROUP_OPEN)
            .attempt()
            .and_r(blank())
            .and_r(term)
            .and_l(blank())
            .and_l(expect(GROUP_CLOSE));

        let atomic = choice(vec![group, var_or_atom()]).with_label("term");

        let apps = blank()
            .and_r(keyword(OF))
            .attempt()
            .and_l(blank())
            .and_r(word())
            .many();

        let conses = blank()
            .and_r(keyword(CONS))
            .attempt()
            .and_l(blank())
            .and_r(atomic.clone())
            .many();

        let tail = blank().and_r(keyword(TAIL)).attempt().opt();

        atomic
            .and_merge(apps, apply_functors)
            .and(conses)
            .and_merge(tail, |(first, rest), tail| {
                make_list(first, rest, tail.is_some())
            })
    })
}

/// Classified by spelling alone: sigil or pronoun means variable.
fn var_or_atom() -> Parser<Term> {
    word().map(|ident| {
        if is_variable_name(&ident) {
            Term::Var(Var::source(ident))
        } else {
            Term::Atom(ident)
        }
    })
}

/// `t の f の g` is `g(f(t))`.
fn apply_functors(term: Term, functors: Vec<String>) -> Term {
    functors
        .into_iter()
        .fold(term, |arg, functor| Term::app(functor, arg))
}

/// With a tail marker the last written term ends the list instead of `Nil`.
fn make_list(first: Term, rest: Vec<Term>, open: bool) -> Term {
    if rest.is_empty() {
        return first;
    }

    let mut items = Vec::with_capacity(rest.len() + 1);
    items.push(first);
    items.extend(rest);

    if open {
        let tail = items.pop();
        Term::list(items, tail)
    } else {
        Term::list(items, None)
    }
}
