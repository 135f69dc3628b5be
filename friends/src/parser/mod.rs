use crate::ast::Span;
use crate::error::FriendsError;
use crate::parser::combinator::{run, Parser, Source};
use crate::resource_limits::ResourceLimits;
use crate::semantic::{Statement, Term};
use regex::Regex;
use std::sync::{Arc, OnceLock};

pub mod combinator;
pub mod statements;
pub mod terms;
pub mod tokens;

/// Parses exactly one statement. Surrounding blanks and comments are allowed.
pub fn parse(content: &str, limits: &ResourceLimits) -> Result<Statement, FriendsError> {
    parse_with(statements::whole(statements::statement()), content, limits)
}

/// Parses a lone term, as printed by `Term`'s `Display`.
pub fn parse_term(content: &str, limits: &ResourceLimits) -> Result<Term, FriendsError> {
    parse_with(statements::whole(terms::term()), content, limits)
}

fn parse_with<T: 'static>(
    parser: Parser<T>,
    content: &str,
    limits: &ResourceLimits,
) -> Result<T, FriendsError> {
    check_limits(content, limits)?;

    let source = Source::new(content);
    run(&parser, &source).map_err(|error| {
        let mut message = String::from("the statement is not well-formed:");
        for line in error.render(&source) {
            message.push('\n');
            message.push_str(&line);
        }
        FriendsError::parse(
            message,
            Span::from_position(error.furthest(), 0),
            "<input>",
            Arc::from(source.text()),
        )
    })
}

fn check_limits(content: &str, limits: &ResourceLimits) -> Result<(), FriendsError> {
    if content.len() > limits.max_source_bytes {
        return Err(FriendsError::ResourceLimitExceeded {
            limit_name: "max_source_bytes".to_string(),
            limit_value: format!("{} bytes", limits.max_source_bytes),
            actual_value: format!("{} bytes", content.len()),
            suggestion: "Split the input into several statements".to_string(),
        });
    }

    // The term parser recurses once per group, so nesting is bounded before parsing.
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let code = content
        .lines()
        .filter_map(|line| line.split(tokens::COMMENT).next());
    for c in code.flat_map(str::chars) {
        if tokens::GROUP_OPEN.starts_with(c) {
            depth += 1;
            deepest = deepest.max(depth);
        } else if tokens::GROUP_CLOSE.starts_with(c) {
            depth = depth.saturating_sub(1);
        }
    }
    if deepest > limits.max_group_depth {
        return Err(FriendsError::ResourceLimitExceeded {
            limit_name: "max_group_depth".to_string(),
            limit_value: limits.max_group_depth.to_string(),
            actual_value: deepest.to_string(),
            suggestion: "Flatten nested 「」 groups".to_string(),
        });
    }
    Ok(())
}

/// A blank-line separated chunk of a larger text, joined onto one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// 1-based line of the paragraph's first line in the original text
    pub line: usize,
    pub text: String,
}

fn paragraph_break() -> &'static Regex {
    static BREAK: OnceLock<Regex> = OnceLock::new();
    BREAK.get_or_init(|| match Regex::new(r"\n[ \t]*\n\s*") {
        Ok(regex) => regex,
        Err(err) => unreachable!("invalid paragraph pattern: {}", err),
    })
}

/// Splits `text` on blank lines. Comments are dropped, the remaining lines of each paragraph
/// are joined with single spaces, and paragraphs left empty are skipped.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    let text = text.replace("\r\n", "\n");
    let mut paragraphs = Vec::new();
    let mut last = 0;
    let mut line = 1;

    let mut chunks: Vec<(usize, &str)> = Vec::new();
    for found in paragraph_break().find_iter(&text) {
        chunks.push((last, &text[last..found.start()]));
        last = found.end();
    }
    chunks.push((last, &text[last..]));

    let mut counted = 0;
    for (start, chunk) in chunks {
        line += text[counted..start].matches('\n').count();
        counted = start;

        let mut first_line = None;
        let mut parts = Vec::new();
        for (offset, raw) in chunk.split('\n').enumerate() {
            let code = raw.split(tokens::COMMENT).next().unwrap_or("").trim();
            if !code.is_empty() {
                first_line.get_or_insert(line + offset);
                parts.push(code);
            }
        }

        if let Some(first_line) = first_line {
            paragraphs.push(Paragraph {
                line: first_line,
                text: parts.join(" "),
            });
        }
    }
    paragraphs
}
