use crate::parser::parse_term;
use crate::{parse, Pred, Prop, Query, Reply, ResourceLimits, Rule, Session, Term};

#[test]
fn test_print_applications() {
    let term = Term::app("なまえ", Term::app("ともだち", Term::atom("かばんちゃん")));
    insta::assert_snapshot!(term.to_string(), @"かばんちゃん の ともだち の なまえ");
}

#[test]
fn test_print_lists() {
    let a = || Term::atom("a");
    let b = || Term::atom("b");

    insta::assert_snapshot!(Term::list(vec![a(), b(), Term::atom("c")], None).to_string(), @"a と b と c");
    insta::assert_snapshot!(Term::cons(a(), Term::var("_x")).to_string(), @"a と _x とか");
    insta::assert_snapshot!(Term::list(vec![a()], None).to_string(), @"a と なし とか");
    insta::assert_snapshot!(Term::list(vec![Term::list(vec![a()], None), b()], None).to_string(), @"「a と なし とか」 と b");
}

#[test]
fn test_print_groups_nested_terms() {
    let pair = Term::list(vec![Term::atom("a"), Term::atom("b")], None);

    let nested_head = Term::list(vec![pair.clone(), Term::atom("c")], None);
    insta::assert_snapshot!(nested_head.to_string(), @"「a と b」 と c");

    let app_element = Term::list(
        vec![Term::atom("a"), Term::app("f", Term::atom("b"))],
        None,
    );
    insta::assert_snapshot!(app_element.to_string(), @"a と 「b の f」");

    insta::assert_snapshot!(Term::app("f", pair).to_string(), @"「a と b」 の f");
}

#[test]
fn test_print_statements() {
    let rule = Rule::new(
        Pred::new("定命の", Term::var("あなた")),
        Prop::conj(
            Prop::pred("ヒトの", Term::var("あなた")),
            Prop::pred("かしこい", Term::var("あなた")),
        ),
    );
    insta::assert_snapshot!(
        rule.to_string(),
        @"すごーい！ あなた は ヒトの フレンズ で あなた は かしこい フレンズ なら あなた は 定命の フレンズ なんだね！"
    );

    let fact = Rule::fact(Pred::new("ヒトの", Term::atom("かばんちゃん")));
    insta::assert_snapshot!(fact.to_string(), @"すごーい！ かばんちゃん は ヒトの フレンズ なんだね！");

    let query = Query {
        prop: Prop::pred("定命の", Term::var("だれ")),
    };
    insta::assert_snapshot!(query.to_string(), @"だれ は 定命の フレンズ なんですか？");
}

#[test]
fn test_printed_terms_parse_back() {
    let limits = ResourceLimits::default();
    let terms = vec![
        Term::app("なまえ", Term::app("ともだち", Term::var("あなた"))),
        Term::list(
            vec![
                Term::list(vec![Term::atom("a"), Term::atom("b")], None),
                Term::app("f", Term::atom("c")),
            ],
            Some(Term::var("_rest")),
        ),
        Term::app("g", Term::cons(Term::atom("x"), Term::atom("y"))),
        Term::list(vec![Term::atom("b")], None),
        Term::app("f", Term::list(vec![Term::var("_x")], None)),
        Term::list(vec![Term::nil()], None),
    ];
    for term in terms {
        let printed = term.to_string();
        assert_eq!(parse_term(&printed, &limits).unwrap(), term, "{}", printed);
    }
}

#[test]
fn test_printed_statements_parse_back() {
    let limits = ResourceLimits::default();
    let inputs = [
        "すごーい！ あなた が ヒトの フレンズ で あなた も かしこい フレンズ なら あなた は 先生の フレンズ なんだね！",
        "だれ は 定命の フレンズ で なし は カット フレンズ なんだっけ？",
    ];
    for input in inputs {
        let statement = parse(input, &limits).unwrap();
        let reparsed = parse(&statement.to_string(), &limits).unwrap();
        assert_eq!(reparsed, statement);
    }
}

#[test]
fn test_one_element_list_in_a_solution_reads_back() {
    let mut session = Session::new();
    session
        .input("すごーい！ a と b は リスト フレンズ なんだね！")
        .unwrap();

    let Reply::Solutions(mut solutions) = session
        .input("_h と _t とか は リスト フレンズ なんですか？")
        .unwrap()
    else {
        panic!("expected a query");
    };
    let solution = solutions.next().unwrap();
    let rest = solution.get("_t").unwrap();

    insta::assert_snapshot!(solution.describe(), @r"
    _h は a 、
    _t は b と なし とか 、
    なのです
    ");
    assert_eq!(
        parse_term(&rest.to_string(), &ResourceLimits::default()).unwrap(),
        *rest
    );
}
