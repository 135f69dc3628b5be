//! Backtracking parser combinators
//!
//! A parser is a function from a `Context` to a result and the context to continue from.
//! Contexts are plain values, so backtracking is just reusing an older context.
//!
//! Backtracking is bounded by the `cut` flag. Every context starts with `cut = true`, which
//! makes a failure decisive: `choice` reports it instead of trying the next alternative.
//! `attempt` clears the flag, marking a failure as safe to retry elsewhere, and a
//! successful `choice` sets it again. Only the alternatives the grammar explicitly wraps in
//! `attempt` are ever re-tried, which keeps parsing linear.

use crate::ast::Position;
use std::cell::OnceCell;
use std::rc::{Rc, Weak};

/// Text being parsed, with line breaks normalized to `\n`
#[derive(Debug, Clone)]
pub struct Source {
    text: String,
}

impl Source {
    pub fn new(text: &str) -> Self {
        let text = if text.contains('\r') {
            text.replace("\r\n", "\n")
        } else {
            text.to_string()
        };
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The 0-based `n`th line, or `""` past the end
    pub fn line(&self, n: usize) -> &str {
        self.text.split('\n').nth(n).unwrap_or("")
    }
}

/// Parser state: where we are and whether a failure here is decisive
#[derive(Debug, Clone, Copy)]
pub struct Context<'s> {
    pub source: &'s Source,
    pub pos: Position,
    pub cut: bool,
}

impl<'s> Context<'s> {
    pub fn new(source: &'s Source) -> Self {
        Self {
            source,
            pos: Position::default(),
            cut: true,
        }
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'s str {
        &self.source.text[self.pos.index..]
    }

    /// Moves forward by `len` bytes, tracking lines and columns.
    pub fn advance(self, len: usize) -> Self {
        let mut pos = self.pos;
        for c in self.rest()[..len].chars() {
            if c == '\n' {
                pos.line += 1;
                pos.column = 0;
            } else {
                pos.column += 1;
            }
        }
        pos.index += len;
        Self { pos, ..self }
    }
}

/// Why a parser failed, with the failures of every alternative it tried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub label: String,
    pub pos: Position,
    pub children: Vec<ParseError>,
}

impl ParseError {
    /// The position furthest into the input among this failure and its children
    pub fn furthest(&self) -> Position {
        self.children
            .iter()
            .map(ParseError::furthest)
            .fold(self.pos, |best, pos| {
                if pos.index > best.index {
                    pos
                } else {
                    best
                }
            })
    }

    /// One line per failure, children indented below their parent
    pub fn render(&self, source: &Source) -> Vec<String> {
        let line = source.line(self.pos.line);
        let start = self.pos.column.saturating_sub(4);
        let near: String = line
            .chars()
            .skip(start)
            .take(self.pos.column + 4 - start)
            .collect();

        let mut lines = vec![format!(
            "{} (line {}, column {}) near «{}»",
            self.label,
            self.pos.line + 1,
            self.pos.column + 1,
            near
        )];
        for child in &self.children {
            for child_line in child.render(source) {
                lines.push(format!("    {}", child_line));
            }
        }
        lines
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// What one parser run produces
pub type Step<'s, T> = (ParseResult<T>, Context<'s>);

type ParseFn<T> = dyn for<'s> Fn(Context<'s>) -> Step<'s, T>;

pub struct Parser<T> {
    run: Rc<ParseFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

/// Failure labelled `label` at the position of `ctx`
pub fn failure<'s, T>(
    label: impl Into<String>,
    ctx: Context<'s>,
    children: Vec<ParseError>,
) -> Step<'s, T> {
    let error = ParseError {
        label: label.into(),
        pos: ctx.pos,
        children,
    };
    (Err(error), ctx)
}

impl<T: 'static> Parser<T> {
    pub fn new<F>(parse_fn: F) -> Self
    where
        F: for<'s> Fn(Context<'s>) -> Step<'s, T> + 'static,
    {
        Self {
            run: Rc::new(parse_fn),
        }
    }

    pub fn parse<'s>(&self, ctx: Context<'s>) -> Step<'s, T> {
        (self.run)(ctx)
    }

    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Parser<U> {
        Parser::new(move |ctx| {
            let (result, next) = self.parse(ctx);
            (result.map(&f), next)
        })
    }

    pub fn discard(self) -> Parser<()> {
        self.map(|_| ())
    }

    /// Renames the failure, keeping its position and children.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        let label = label.into();
        Parser::new(move |ctx| {
            let (result, next) = self.parse(ctx);
            let result = result.map_err(|error| ParseError {
                label: label.clone(),
                ..error
            });
            (result, next)
        })
    }

    /// Rejects successful values that do not satisfy `pred`, failing where this parser started.
    pub fn filter(self, pred: impl Fn(&T) -> bool + 'static, label: impl Into<String>) -> Self {
        let label = label.into();
        Parser::new(move |ctx| {
            let (result, next) = self.parse(ctx);
            match result {
                Ok(value) if !pred(&value) => failure(label.clone(), ctx, Vec::new()),
                other => (other, next),
            }
        })
    }

    pub fn and<U: 'static>(self, second: Parser<U>) -> Parser<(T, U)> {
        Parser::new(move |ctx| {
            let (first, ctx) = self.parse(ctx);
            let x = match first {
                Ok(x) => x,
                Err(error) => return (Err(error), ctx),
            };
            let (then, ctx) = second.parse(ctx);
            (then.map(|y| (x, y)), ctx)
        })
    }

    /// Sequence, keeping the left value
    pub fn and_l<U: 'static>(self, second: Parser<U>) -> Parser<T> {
        self.and(second).map(|(x, _)| x)
    }

    /// Sequence, keeping the right value
    pub fn and_r<U: 'static>(self, second: Parser<U>) -> Parser<U> {
        self.and(second).map(|(_, y)| y)
    }

    /// Sequence, combining both values into one record
    pub fn and_merge<U: 'static, V: 'static>(
        self,
        second: Parser<U>,
        merge: impl Fn(T, U) -> V + 'static,
    ) -> Parser<V> {
        self.and(second).map(move |(x, y)| merge(x, y))
    }

    /// Zero or more repetitions, stopping before the first failed one.
    ///
    /// The repeated parser must consume input whenever it succeeds (see `nonempty`),
    /// otherwise this never returns.
    pub fn many(self) -> Parser<Vec<T>> {
        Parser::new(move |ctx| {
            let mut current = ctx;
            let mut values = Vec::new();
            loop {
                let (result, next) = self.parse(current);
                match result {
                    Ok(value) => {
                        values.push(value);
                        current = next;
                    }
                    Err(_) => return (Ok(values), current),
                }
            }
        })
    }

    pub fn opt(self) -> Parser<Option<T>> {
        Parser::new(move |ctx| match self.parse(ctx) {
            (Ok(value), next) => (Ok(Some(value)), next),
            (Err(_), _) => (Ok(None), ctx),
        })
    }

    /// Marks a failure of this parser as not decisive, so an enclosing `choice` moves on.
    pub fn attempt(self) -> Self {
        Parser::new(move |ctx| {
            let (result, next) = self.parse(ctx);
            (result, Context { cut: false, ..next })
        })
    }

    /// Fails instead of succeeding without consuming anything.
    pub fn nonempty(self) -> Self {
        Parser::new(move |ctx| {
            let (result, next) = self.parse(ctx);
            if result.is_ok() && next.pos.index == ctx.pos.index {
                return failure("any character", ctx, Vec::new());
            }
            (result, next)
        })
    }
}

/// Tries `alternatives` in order. Gives up on the first decisive failure.
pub fn choice<T: 'static>(alternatives: Vec<Parser<T>>) -> Parser<T> {
    Parser::new(move |ctx| {
        let mut errors = Vec::new();
        for alternative in &alternatives {
            let (result, next) = alternative.parse(ctx);
            match result {
                Ok(value) => return (Ok(value), Context { cut: true, ..next }),
                Err(error) => {
                    errors.push(error);
                    if next.cut {
                        break;
                    }
                }
            }
        }
        failure("one of", ctx, errors)
    })
}

pub fn success<T: Clone + 'static>(value: T) -> Parser<T> {
    Parser::new(move |ctx| (Ok(value.clone()), ctx))
}

/// Exactly `pattern`. Fails at the first character that differs.
pub fn expect(pattern: impl Into<String>) -> Parser<String> {
    let pattern = pattern.into();
    Parser::new(move |ctx| {
        let rest = ctx.rest();
        if rest.starts_with(pattern.as_str()) {
            return (Ok(pattern.clone()), ctx.advance(pattern.len()));
        }
        let matched: usize = pattern
            .chars()
            .zip(rest.chars())
            .take_while(|(expected, actual)| expected == actual)
            .map(|(c, _)| c.len_utf8())
            .sum();
        failure(pattern.clone(), ctx.advance(matched), Vec::new())
    })
}

/// Longest run of characters in `class`, possibly empty
pub fn take_while(class: impl Fn(char) -> bool + 'static) -> Parser<String> {
    Parser::new(move |ctx| {
        let rest = ctx.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !class(c))
            .map_or(rest.len(), |(i, _)| i);
        (Ok(rest[..len].to_string()), ctx.advance(len))
    })
}

/// Identifier characters: ASCII word characters plus kana and kanji
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || ('あ'..='ん').contains(&c)
        || ('ア'..='ン').contains(&c)
        || ('一'..='龠').contains(&c)
        || c == '々'
        || c == '〆'
}

pub fn word() -> Parser<String> {
    take_while(is_word_char).nonempty().with_label("word")
}

pub fn end_of_input() -> Parser<()> {
    Parser::new(|ctx| {
        if ctx.pos.index < ctx.source.len() {
            return failure("end of input", ctx, Vec::new());
        }
        (Ok(()), ctx)
    })
}

/// Builds a self-referential parser. `build` receives a forward reference to the parser
/// it returns.
pub fn recursive<T: 'static>(build: impl FnOnce(Parser<T>) -> Parser<T>) -> Parser<T> {
    let slot: Rc<OnceCell<Parser<T>>> = Rc::new(OnceCell::new());

    // The forward reference is weak so the finished parser does not own itself.
    let weak: Weak<OnceCell<Parser<T>>> = Rc::downgrade(&slot);
    let forward = Parser::new(move |ctx| {
        let Some(slot) = weak.upgrade() else {
            unreachable!("recursive parser outlived its definition");
        };
        match slot.get() {
            Some(parser) => parser.parse(ctx),
            None => unreachable!("recursive parser used before it was defined"),
        }
    });

    if slot.set(build(forward)).is_err() {
        unreachable!("recursive parser defined twice");
    }

    Parser::new(move |ctx| match slot.get() {
        Some(parser) => parser.parse(ctx),
        None => unreachable!("recursive parser used before it was defined"),
    })
}

pub fn run<T: 'static>(parser: &Parser<T>, source: &Source) -> ParseResult<T> {
    parser.parse(Context::new(source)).0
}
