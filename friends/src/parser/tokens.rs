//! Surface tokens of the language

use crate::parser::combinator::{word, Parser};

/// Opens a rule: "すごーい！ ... なんだね！"
pub const RULE_MARK: &str = "すごーい！";
pub const AXIOM_MARK: &str = "なんだね！";
pub const IF: &str = "なら";
pub const TYPE_MARK: &str = "フレンズ";
pub const SUBJECT_MARKERS: [&str; 3] = ["は", "が", "も"];
/// The second spelling is deprecated but still accepted.
pub const QUERY_MARKS: [&str; 2] = ["なんですか？", "なんだっけ？"];
pub const AND: &str = "で";
pub const OF: &str = "の";
pub const CONS: &str = "と";
pub const TAIL: &str = "とか";
pub const GROUP_OPEN: &str = "「";
pub const GROUP_CLOSE: &str = "」";
/// Starts a comment running to the end of the line
pub const COMMENT: &str = "※";

pub const VAR_SIGIL: char = '_';

/// Pronouns that always denote variables
pub const VAR_WORDS: [&str; 11] = [
    "あなた",
    "きみ",
    "かれ",
    "かのじょ",
    "だれ",
    "なに",
    "あれ",
    "これ",
    "これら",
    "それ",
    "それら",
];

pub fn is_variable_name(ident: &str) -> bool {
    ident.starts_with(VAR_SIGIL) || VAR_WORDS.contains(&ident)
}

/// Whitespace and comments, possibly none
pub fn blank() -> Parser<()> {
    Parser::new(|ctx| {
        let rest = ctx.rest();
        let mut len = 0;
        loop {
            let tail = &rest[len..];
            if let Some(comment) = tail.strip_prefix(COMMENT) {
                len += COMMENT.len() + comment.find('\n').unwrap_or(comment.len());
            } else if let Some(c) = tail.chars().next().filter(|c| c.is_whitespace()) {
                len += c.len_utf8();
            } else {
                break;
            }
        }
        (Ok(()), ctx.advance(len))
    })
}

/// A whole word equal to `keyword`; `とか` does not match `と`.
pub fn keyword(keyword: &'static str) -> Parser<String> {
    word().filter(move |w| w == keyword, keyword)
}
