//! Recognizers for top-level declaration heads and other line kinds.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, not, opt, recognize, value},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

/// Parse an identifier (letter, `_` or `$`, then alphanumerics, `_` or `$`).
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))(input)
}

fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag(word), multispace1)
}

/// What a value declaration is initialized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    /// Arrow function, function expression, call or member expression.
    Callable,
    /// Literal, object, array or plain identifier.
    Data,
    /// Nothing on this line after `=`.
    Deferred,
}

/// Kind of declaration a line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadKind {
    Function,
    Class,
    Value(Initializer),
    /// `() => …` or `function (…)` with no name.
    Anonymous,
    /// `interface`, `type` or `enum`.
    TypeOnly,
}

/// A recognized declaration head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationHead<'a> {
    pub name: Option<&'a str>,
    pub kind: HeadKind,
    pub exported: bool,
}

impl DeclarationHead<'_> {
    /// Whether this head opens a component-level declaration, given the
    /// helper suffix that lets data-initialized values count.
    pub fn opens_declaration(&self, variant_suffix: &str) -> bool {
        match self.kind {
            HeadKind::Function | HeadKind::Class | HeadKind::Anonymous => true,
            HeadKind::Value(Initializer::Callable | Initializer::Deferred) => true,
            HeadKind::Value(Initializer::Data) => self
                .name
                .is_some_and(|name| has_variant_suffix(name, variant_suffix)),
            HeadKind::TypeOnly => false,
        }
    }
}

/// Whether `name` is `<Base><suffix>` with a non-empty base, ignoring case.
pub fn has_variant_suffix(name: &str, suffix: &str) -> bool {
    variant_base(name, suffix).is_some()
}

/// The `<Base>` part of a `<Base><suffix>` name.
pub fn variant_base<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    if suffix.is_empty() || name.len() <= suffix.len() || !name.is_char_boundary(name.len() - suffix.len()) {
        return None;
    }
    let (base, tail) = name.split_at(name.len() - suffix.len());
    tail.eq_ignore_ascii_case(suffix).then_some(base)
}

/// Leading `export`, `default` and `declare` keywords; yields whether the
/// declaration is exported.
fn modifiers(input: &str) -> IResult<&str, bool> {
    map(
        tuple((
            opt(keyword("export")),
            opt(keyword("default")),
            opt(keyword("declare")),
        )),
        |(exported, _, _)| exported.is_some(),
    )(input)
}

fn function_head(input: &str) -> IResult<&str, &str> {
    preceded(
        tuple((
            opt(keyword("async")),
            tag("function"),
            alt((
                value((), pair(multispace0, char('*'))),
                value((), multispace1),
            )),
            multispace0,
        )),
        identifier,
    )(input)
}

fn anonymous_function(input: &str) -> IResult<&str, ()> {
    value(
        (),
        tuple((opt(keyword("async")), tag("function"), multispace0, char('('))),
    )(input)
}

fn class_head(input: &str) -> IResult<&str, &str> {
    preceded(keyword("class"), identifier)(input)
}

fn type_head(input: &str) -> IResult<&str, &str> {
    preceded(
        alt((keyword("interface"), keyword("type"), keyword("enum"))),
        identifier,
    )(input)
}

/// `const Name[: Type] = <init>`; the remaining input is the initializer.
fn value_head(input: &str) -> IResult<&str, &str> {
    let (input, _) = alt((keyword("const"), keyword("let"), keyword("var")))(input)?;
    let (input, name) = identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = opt(preceded(char(':'), take_till(|c| c == '=')))(input)?;
    let (input, _) = char('=')(input)?;
    let (input, _) = not(char('='))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, name))
}

fn is_anonymous_arrow(input: &str) -> bool {
    let input = input
        .strip_prefix("async")
        .map(str::trim_start)
        .unwrap_or(input);
    input.starts_with('(') && input.contains("=>")
}

/// Classify the text after `=` in a value declaration.
pub fn classify_initializer(init: &str) -> Initializer {
    let init = init.trim();
    let Some(first) = init.chars().next() else {
        return Initializer::Deferred;
    };

    if first == '(' || init.starts_with("function") || init.starts_with("async ") || init.starts_with("async(") {
        return Initializer::Callable;
    }
    if matches!(first, '{' | '[' | '"' | '\'' | '`' | '-' | '!') || first.is_ascii_digit() {
        return Initializer::Data;
    }

    match identifier(init) {
        Ok((rest, word)) => {
            if matches!(word, "new" | "true" | "false" | "null" | "undefined" | "typeof") {
                return Initializer::Data;
            }
            let rest = rest.trim_start();
            if rest.starts_with("=>")
                || rest.starts_with('(')
                || rest.starts_with('<')
                || rest.starts_with('.')
                || rest.starts_with('`')
            {
                Initializer::Callable
            } else {
                Initializer::Data
            }
        }
        Err(_) => Initializer::Data,
    }
}

/// Recognize a declaration head at the start of `line`.
pub fn parse_head(line: &str) -> Option<DeclarationHead<'_>> {
    let input = line.trim_start();
    let (input, exported) = modifiers(input).ok()?;
    let head = |name, kind| DeclarationHead { name, kind, exported };

    if let Ok((_, name)) = function_head(input) {
        return Some(head(Some(name), HeadKind::Function));
    }
    if let Ok((_, name)) = class_head(input) {
        return Some(head(Some(name), HeadKind::Class));
    }
    if let Ok((init, name)) = value_head(input) {
        return Some(head(Some(name), HeadKind::Value(classify_initializer(init))));
    }
    if let Ok((_, name)) = type_head(input) {
        return Some(head(Some(name), HeadKind::TypeOnly));
    }
    if anonymous_function(input).is_ok() || is_anonymous_arrow(input) {
        return Some(head(None, HeadKind::Anonymous));
    }

    None
}

/// Whether the line starts an ES import statement.
pub fn is_import_line(line: &str) -> bool {
    let t = line.trim_start();
    t.strip_prefix("import")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_whitespace() || matches!(c, '{' | '*' | '"' | '\''))
}

/// Whether an import statement started on an earlier line is complete.
pub fn import_is_complete(statement: &str) -> bool {
    let t = statement.trim_end();
    if t.ends_with(';') {
        return true;
    }
    // Side-effect import: `import "./styles.css"`.
    let after = t.trim_start_matches("import").trim_start();
    if after.starts_with('"') || after.starts_with('\'') {
        return true;
    }
    t.rsplit_once("from")
        .map(|(_, source)| source.trim())
        .is_some_and(|source| {
            source.len() >= 2
                && (source.starts_with('"') || source.starts_with('\''))
                && (source.ends_with('"') || source.ends_with('\''))
        })
}

/// `export { … }` / `export * from …` aggregation lines.
pub fn is_export_aggregate(line: &str) -> bool {
    let t = line.trim_start();
    t.strip_prefix("export")
        .map(str::trim_start)
        .is_some_and(|rest| rest.starts_with('{') || rest.starts_with('*'))
}

/// `"use client";` style directives.
pub fn is_directive(line: &str) -> bool {
    let t = line.trim().trim_end_matches(';');
    matches!(
        t,
        "\"use client\"" | "'use client'" | "\"use server\"" | "'use server'" | "\"use strict\"" | "'use strict'"
    )
}
