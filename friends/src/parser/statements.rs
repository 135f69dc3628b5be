use crate::parser::combinator::{choice, end_of_input, expect, word, Parser};
use crate::parser::terms::term;
use crate::parser::tokens::{
    blank, keyword, AND, AXIOM_MARK, IF, QUERY_MARKS, RULE_MARK, SUBJECT_MARKERS, TYPE_MARK,
};
use crate::semantic::{Pred, Prop, Query, Rule, Statement};

/// What follows the first proposition of a rule
enum RuleTail {
    Axiom,
    Inference { more: Vec<Pred>, head: Pred },
}

/// statement = rule | query
pub(crate) fn statement() -> Parser<Statement> {
    let pred = pred();
    choice(vec![
        rule(pred.clone()).map(Statement::Rule),
        query(pred).map(Statement::Query),
    ])
}

/// Surrounding blanks allowed; anything left over is an error.
pub(crate) fn whole<T: 'static>(parser: Parser<T>) -> Parser<T> {
    blank()
        .and_r(parser)
        .and_l(blank())
        .and_l(end_of_input())
}

fn subject_marker() -> Parser<String> {
    word().filter(
        |w| SUBJECT_MARKERS.contains(&w.as_str()),
        SUBJECT_MARKERS.join("/"),
    )
}

/// prop = term ("は" | "が" | "も") name "フレンズ"
fn pred() -> Parser<Pred> {
    term()
        .and_l(blank())
        .and_l(subject_marker())
        .and_l(blank())
        .and_merge(word().with_label("predicate"), |term, name| {
            Pred::new(name, term)
        })
        .and_l(blank())
        .and_l(expect(TYPE_MARK))
}

/// ("で" prop)*
fn more_preds(pred: Parser<Pred>) -> Parser<Vec<Pred>> {
    blank()
        .and_r(keyword(AND))
        .attempt()
        .and_l(blank())
        .and_r(pred)
        .many()
}

/// Right-folded conjunction of `first` and `rest`
fn conjunction(first: Pred, rest: Vec<Pred>) -> Prop {
    let mut props: Vec<Prop> = rest.into_iter().map(Prop::Pred).collect();
    match props.pop() {
        None => Prop::Pred(first),
        Some(last) => {
            let right = props
                .into_iter()
                .rev()
                .fold(last, |acc, prop| Prop::conj(prop, acc));
            Prop::conj(Prop::Pred(first), right)
        }
    }
}

fn conj(pred: Parser<Pred>) -> Parser<Prop> {
    pred.clone().and_merge(more_preds(pred), conjunction)
}

/// rule = "すごーい！" prop ("なんだね！" | ("で" prop)* "なら" prop "なんだね！")
fn rule(pred: Parser<Pred>) -> Parser<Rule> {
    let axiom = blank()
        .and_r(expect(AXIOM_MARK))
        .attempt()
        .map(|_| RuleTail::Axiom);

    let inference = more_preds(pred.clone())
        .and_l(blank())
        .and_l(keyword(IF))
        .and_l(blank())
        .and_merge(pred.clone(), |more, head| RuleTail::Inference { more, head })
        .and_l(blank())
        .and_l(expect(AXIOM_MARK));

    expect(RULE_MARK)
        .attempt()
        .and_l(blank())
        .and_r(pred)
        .and_merge(choice(vec![axiom, inference]), |first, tail| match tail {
            RuleTail::Axiom => Rule::fact(first),
            RuleTail::Inference { more, head } => Rule::new(head, conjunction(first, more)),
        })
}

/// query = conj ("なんですか？" | "なんだっけ？")
fn query(pred: Parser<Pred>) -> Parser<Query> {
    let mark = choice(vec![
        expect(QUERY_MARKS[0]).attempt(),
        expect(QUERY_MARKS[1]),
    ]);
    conj(pred)
        .and_l(blank())
        .and_l(mark)
        .map(|prop| Query { prop })
}
