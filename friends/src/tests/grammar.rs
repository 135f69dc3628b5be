use crate::parser::{parse, parse_term, split_paragraphs, Paragraph};
use crate::{FriendsError, Pred, Prop, Query, ResourceLimits, Rule, Statement, Term};

fn statement(input: &str) -> Statement {
    parse(input, &ResourceLimits::default()).unwrap()
}

fn term(input: &str) -> Term {
    parse_term(input, &ResourceLimits::default()).unwrap()
}

#[test]
fn test_parse_axiom() {
    let result = statement("すごーい！ かばんちゃん は ヒトの フレンズ なんだね！");
    assert_eq!(
        result,
        Statement::Rule(Rule::fact(Pred::new(
            "ヒトの",
            Term::atom("かばんちゃん")
        )))
    );
}

#[test]
fn test_parse_inference() {
    let result =
        statement("すごーい！ あなた が ヒトの フレンズ なら あなた は 定命の フレンズ なんだね！");
    assert_eq!(
        result,
        Statement::Rule(Rule::new(
            Pred::new("定命の", Term::var("あなた")),
            Prop::pred("ヒトの", Term::var("あなた")),
        ))
    );
}

#[test]
fn test_parse_inference_with_several_premises() {
    let result = statement(
        "すごーい！ あなた が ヒトの フレンズ で あなた も かしこい フレンズ なら あなた は 先生の フレンズ なんだね！",
    );
    let Statement::Rule(rule) = result else {
        panic!("expected a rule");
    };
    assert_eq!(rule.head, Pred::new("先生の", Term::var("あなた")));
    assert_eq!(
        rule.goal,
        Some(Prop::conj(
            Prop::pred("ヒトの", Term::var("あなた")),
            Prop::pred("かしこい", Term::var("あなた")),
        ))
    );
}

#[test]
fn test_parse_query() {
    let result = statement("だれ は 定命の フレンズ なんですか？");
    assert_eq!(
        result,
        Statement::Query(Query {
            prop: Prop::pred("定命の", Term::var("だれ")),
        })
    );
}

#[test]
fn test_parse_deprecated_query_mark() {
    assert_eq!(
        statement("だれ は 定命の フレンズ なんだっけ？"),
        statement("だれ は 定命の フレンズ なんですか？")
    );
}

#[test]
fn test_conjunction_folds_right() {
    let Statement::Query(query) =
        statement("a は p フレンズ で b は q フレンズ で c は r フレンズ なんですか？")
    else {
        panic!("expected a query");
    };
    assert_eq!(
        query.prop,
        Prop::conj(
            Prop::pred("p", Term::atom("a")),
            Prop::conj(
                Prop::pred("q", Term::atom("b")),
                Prop::pred("r", Term::atom("c")),
            ),
        )
    );
}

#[test]
fn test_first_application_is_innermost() {
    assert_eq!(
        term("かばんちゃん の ともだち の なまえ"),
        Term::app("なまえ", Term::app("ともだち", Term::atom("かばんちゃん")))
    );
}

#[test]
fn test_list_sugar() {
    let a = || Term::atom("a");
    let b = || Term::atom("b");
    let c = || Term::atom("c");

    assert_eq!(term("a と b と c"), Term::list(vec![a(), b(), c()], None));
    assert_eq!(term("a と b とか"), Term::cons(a(), b()));
    assert_eq!(term("a とか"), a());
    assert_eq!(
        term("a と b と _rest とか"),
        Term::list(vec![a(), b()], Some(Term::var("_rest")))
    );
}

#[test]
fn test_groups() {
    let pair = Term::list(vec![Term::atom("a"), Term::atom("b")], None);
    assert_eq!(
        term("「a と b」 と c"),
        Term::list(vec![pair.clone(), Term::atom("c")], None)
    );
    assert_eq!(term("「 「a」 」"), Term::atom("a"));
    assert_eq!(
        term("「a と b」 の なまえ"),
        Term::app("なまえ", pair)
    );
}

#[test]
fn test_keywords_are_whole_words() {
    assert_eq!(
        term("a と とり"),
        Term::list(vec![Term::atom("a"), Term::atom("とり")], None)
    );
    assert_eq!(term("のはら の なまえ"), Term::app("なまえ", Term::atom("のはら")));
}

#[test]
fn test_variables_are_classified_lexically() {
    assert_eq!(term("_x"), Term::var("_x"));
    assert_eq!(term("それら"), Term::var("それら"));
    assert_eq!(term("あなたたち"), Term::atom("あなたたち"));
    assert_eq!(term("x"), Term::atom("x"));
}

#[test]
fn test_comments_and_line_breaks_are_blank() {
    let input = "すごーい！ ※ the first friend\n  かばんちゃん は\n  ヒトの フレンズ\nなんだね！ ※ done";
    assert_eq!(
        statement(input),
        statement("すごーい！ かばんちゃん は ヒトの フレンズ なんだね！")
    );
}

#[test]
fn test_trailing_input_is_rejected() {
    let result = parse(
        "だれ は 定命の フレンズ なんですか？ おまけ",
        &ResourceLimits::default(),
    );
    match result {
        Err(FriendsError::Parse(details)) => {
            assert!(details.message.starts_with("the statement is not well-formed:"));
            assert!(details.message.contains("end of input"));
            assert_eq!(details.span.line, 1);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_type_mark_is_rejected() {
    let result = parse("だれ は 定命の なんですか？", &ResourceLimits::default());
    let Err(FriendsError::Parse(details)) = result else {
        panic!("expected a parse error");
    };
    assert!(details.message.contains("フレンズ"));
}

#[test]
fn test_rule_without_end_mark_is_rejected() {
    assert!(parse(
        "すごーい！ かばんちゃん は ヒトの フレンズ",
        &ResourceLimits::default()
    )
    .is_err());
}

#[test]
fn test_empty_input_is_rejected() {
    assert!(parse("", &ResourceLimits::default()).is_err());
    assert!(parse("  ※ nothing\n", &ResourceLimits::default()).is_err());
}

#[test]
fn test_source_size_limit() {
    let limits = ResourceLimits {
        max_source_bytes: 10,
        ..ResourceLimits::default()
    };
    match parse("だれ は 定命の フレンズ なんですか？", &limits) {
        Err(FriendsError::ResourceLimitExceeded { limit_name, .. }) => {
            assert_eq!(limit_name, "max_source_bytes");
        }
        other => panic!("expected a limit error, got {:?}", other),
    }
}

#[test]
fn test_group_depth_limit() {
    let limits = ResourceLimits {
        max_group_depth: 2,
        ..ResourceLimits::default()
    };
    assert!(parse_term("「「a」」", &limits).is_ok());
    match parse_term("「「「a」」」", &limits) {
        Err(FriendsError::ResourceLimitExceeded {
            limit_name,
            actual_value,
            ..
        }) => {
            assert_eq!(limit_name, "max_group_depth");
            assert_eq!(actual_value, "3");
        }
        other => panic!("expected a limit error, got {:?}", other),
    }
}

#[test]
fn test_group_depth_ignores_comments() {
    let limits = ResourceLimits {
        max_group_depth: 2,
        ..ResourceLimits::default()
    };
    let input = "※ 「「「「「「「「「「\nすごーい！ 「「a」」 は ヒトの フレンズ なんだね！ ※ 「「「";
    assert_eq!(
        parse(input, &limits).unwrap(),
        Statement::Rule(Rule::fact(Pred::new("ヒトの", Term::atom("a"))))
    );
    assert!(parse("※ 「\n「「「a」」」", &limits).is_err());
}

#[test]
fn test_split_paragraphs() {
    let text = "a\nb\n\n\nc ※ note\n\n※ only a comment\n";
    assert_eq!(
        split_paragraphs(text),
        vec![
            Paragraph {
                line: 1,
                text: "a b".to_string(),
            },
            Paragraph {
                line: 4,
                text: "c".to_string(),
            },
        ]
    );
}

#[test]
fn test_split_paragraphs_handles_crlf_and_indented_blank_lines() {
    let text = "  x\r\n  \r\ny\r\n";
    let paragraphs = split_paragraphs(text);
    let texts: Vec<&str> = paragraphs.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["x", "y"]);
    assert_eq!(paragraphs[1].line, 3);
}
