use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;

use crate::options::{RegexOption, RegexOptions};
use crate::{Error, Result};

/// Limits forwarded to the backtracking engine at compile time.
///
/// `None` keeps the engine's own default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub backtrack_limit: Option<usize>,
    pub delegate_size_limit: Option<usize>,
}

impl EngineConfig {
    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.backtrack_limit = Some(limit);
        self
    }

    pub fn delegate_size_limit(mut self, limit: usize) -> Self {
        self.delegate_size_limit = Some(limit);
        self
    }
}

/// A compiled matcher produced by [`PatternBuilder::build`](crate::PatternBuilder::build).
#[derive(Debug, Clone)]
pub struct Regex {
    backend: fancy_regex::Regex,
    pattern: String,
    options: RegexOptions,
    names: Arc<[Option<String>]>,
}

impl Regex {
    /// The assembled pattern, before any engine-specific rewriting.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> RegexOptions {
        self.options
    }

    /// Group names by index. Index 0 is the whole match and is always `None`.
    pub fn capture_names(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.names.iter().map(Option::as_deref)
    }

    pub fn is_match(&self, input: &str) -> Result<bool> {
        self.backend.is_match(input).map_err(match_error)
    }

    pub fn find(&self, input: &str) -> Result<Option<Match>> {
        let matched = self.backend.find(input).map_err(match_error)?;
        Ok(matched.map(Match::from_backend))
    }

    pub fn find_all(&self, input: &str) -> Result<Vec<Match>> {
        let mut out = Vec::new();
        for matched in self.backend.find_iter(input) {
            let matched = matched.map_err(match_error)?;
            out.push(Match::from_backend(matched));
        }
        Ok(out)
    }

    pub fn captures(&self, input: &str) -> Result<Option<Captures>> {
        let captures = self.backend.captures(input).map_err(match_error)?;
        Ok(captures
            .as_ref()
            .map(|captures| Captures::from_backend(captures, &self.names)))
    }

    pub fn captures_from_pos(&self, input: &str, start: usize) -> Result<Option<Captures>> {
        let captures = self
            .backend
            .captures_from_pos(input, start)
            .map_err(match_error)?;
        Ok(captures
            .as_ref()
            .map(|captures| Captures::from_backend(captures, &self.names)))
    }

    pub fn captures_all(&self, input: &str) -> Result<Vec<Captures>> {
        let mut out = Vec::new();
        for captures in self.backend.captures_iter(input) {
            let captures = captures.map_err(match_error)?;
            out.push(Captures::from_backend(&captures, &self.names));
        }
        Ok(out)
    }

    pub fn split_all(&self, input: &str) -> Result<Vec<String>> {
        let mut out = Vec::new();
        for part in self.backend.split(input) {
            out.push(part.map_err(match_error)?.to_string());
        }
        Ok(out)
    }
}

/// Capture groups of one successful match. Group 0 is the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    groups: Vec<Option<Match>>,
    names: Arc<[Option<String>]>,
}

impl Captures {
    fn from_backend(captures: &fancy_regex::Captures<'_>, names: &Arc<[Option<String>]>) -> Self {
        let mut groups = Vec::with_capacity(captures.len());
        for idx in 0..captures.len() {
            let matched = captures.get(idx).map(Match::from_backend);
            groups.push(matched);
        }
        Self {
            groups,
            names: Arc::clone(names),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Match> {
        self.groups.get(index).and_then(Option::as_ref)
    }

    pub fn name(&self, name: &str) -> Option<&Match> {
        let index = self
            .names
            .iter()
            .position(|candidate| candidate.as_deref() == Some(name))?;
        self.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    start: usize,
    end: usize,
    text: String,
}

impl Match {
    fn from_backend(matched: fancy_regex::Match<'_>) -> Self {
        Self {
            start: matched.start(),
            end: matched.end(),
            text: matched.as_str().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

pub(crate) fn compile(pattern: &str, options: RegexOptions, config: &EngineConfig) -> Result<Regex> {
    check_repetitions(pattern).map_err(|message| compile_error(pattern, message))?;

    let mut source = if options.contains(RegexOption::ExplicitCapture) {
        suppress_unnamed_captures(pattern)
    } else {
        Cow::Borrowed(pattern)
    };
    if options.contains(RegexOption::IgnorePatternWhitespace) {
        source = Cow::Owned(format!("(?x){source}"));
    }

    let mut builder = fancy_regex::RegexBuilder::new(&source);
    builder.case_insensitive(options.contains(RegexOption::IgnoreCase));
    builder.multi_line(options.contains(RegexOption::Multiline));
    builder.dot_matches_new_line(options.contains(RegexOption::Singleline));
    if let Some(limit) = config.backtrack_limit {
        builder.backtrack_limit(limit);
    }
    if let Some(limit) = config.delegate_size_limit {
        builder.delegate_size_limit(limit);
    }
    let backend = builder
        .build()
        .map_err(|err| compile_error(pattern, err.to_string()))?;

    let names = backend
        .capture_names()
        .map(|name| name.map(str::to_string))
        .collect();
    Ok(Regex {
        backend,
        pattern: pattern.to_string(),
        options,
        names,
    })
}

fn compile_error(pattern: &str, message: String) -> Error {
    Error::PatternCompilation {
        pattern: pattern.to_string(),
        message,
    }
}

fn match_error(err: fancy_regex::Error) -> Error {
    Error::Match(err.to_string())
}

/// Escapes `value` so that it matches only itself.
///
/// Whitespace is escaped too, so the text survives `(?x)` mode.
pub fn escape(value: &str) -> Cow<'_, str> {
    escape_with(value, is_regex_meta)
}

/// Like [`escape`], for text placed inside `[...]`. A `-` is left bare so it
/// keeps its range meaning between two characters and reads as a dash elsewhere.
pub fn escape_class(value: &str) -> Cow<'_, str> {
    escape_with(value, |ch| ch != '-' && is_regex_meta(ch))
}

fn escape_with(value: &str, needs_escape: impl Fn(char) -> bool) -> Cow<'_, str> {
    let mut out = String::with_capacity(value.len());
    let mut changed = false;

    for ch in value.chars() {
        if ch.is_whitespace() {
            push_escaped_whitespace(&mut out, ch);
            changed = true;
            continue;
        }
        if needs_escape(ch) {
            out.push('\\');
            changed = true;
        }
        out.push(ch);
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(value)
    }
}

fn push_escaped_whitespace(out: &mut String, ch: char) {
    match ch {
        ' ' => out.push_str(r"\ "),
        '\t' => out.push_str(r"\t"),
        '\n' => out.push_str(r"\n"),
        '\r' => out.push_str(r"\r"),
        _ => out.push_str(&format!(r"\x{{{:X}}}", ch as u32)),
    }
}

fn is_regex_meta(ch: char) -> bool {
    matches!(
        ch,
        '\\' | '.'
            | '+'
            | '*'
            | '?'
            | '('
            | ')'
            | '|'
            | '['
            | ']'
            | '{'
            | '}'
            | '^'
            | '$'
            | '#'
            | '&'
            | '-'
            | '~'
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lexeme {
    /// A backslash or the character it escapes.
    Escaped,
    /// Part of a bracketed class, brackets included.
    Class,
    Plain,
}

/// Classifies each character of `pattern` by the syntactic context it sits in.
pub(crate) fn lexemes(pattern: &str) -> Vec<(usize, char, Lexeme)> {
    let mut out = Vec::with_capacity(pattern.len());
    let mut chars = pattern.char_indices();
    let mut in_class = false;
    let mut class_body_start = 0;
    let mut negation_seen = false;

    while let Some((idx, ch)) = chars.next() {
        if ch == '\\' {
            out.push((idx, ch, Lexeme::Escaped));
            if let Some((next_idx, next)) = chars.next() {
                out.push((next_idx, next, Lexeme::Escaped));
            }
            continue;
        }

        if in_class {
            let leading = idx == class_body_start;
            if ch == '^' && leading && !negation_seen {
                negation_seen = true;
                class_body_start = idx + ch.len_utf8();
            } else if ch == ']' && !leading {
                in_class = false;
            }
            out.push((idx, ch, Lexeme::Class));
            continue;
        }

        if ch == '[' {
            in_class = true;
            negation_seen = false;
            class_body_start = idx + ch.len_utf8();
            out.push((idx, ch, Lexeme::Class));
            continue;
        }

        out.push((idx, ch, Lexeme::Plain));
    }
    out
}

/// Rejects `{...}` quantifiers that are not `{n}`, `{n,}` or `{n,m}` with `n <= m`.
///
/// The engine reads a malformed brace as literal text instead of failing.
pub(crate) fn check_repetitions(pattern: &str) -> std::result::Result<(), String> {
    for (idx, ch, lexeme) in lexemes(pattern) {
        if ch != '{' || lexeme != Lexeme::Plain {
            continue;
        }
        let rest = &pattern[idx + 1..];
        let Some(close) = rest.find('}') else {
            return Err(format!("unterminated repetition quantifier at offset {idx}"));
        };
        let body = &rest[..close];
        if parse_repetition(body).is_none() {
            return Err(format!(
                "invalid repetition quantifier `{{{body}}}` at offset {idx}"
            ));
        }
    }
    Ok(())
}

fn parse_repetition(body: &str) -> Option<(u32, Option<u32>)> {
    let (lo, hi) = match body.split_once(',') {
        Some((lo, "")) => (parse_count(lo)?, None),
        Some((lo, hi)) => (parse_count(lo)?, Some(parse_count(hi)?)),
        None => {
            let count = parse_count(body)?;
            (count, Some(count))
        }
    };
    match hi {
        Some(hi) if lo > hi => None,
        _ => Some((lo, hi)),
    }
}

fn parse_count(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Turns every unnamed capturing `(` into `(?:`. Named groups and other
/// `(?...)` constructs are left alone.
pub(crate) fn suppress_unnamed_captures(pattern: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut changed = false;

    for (idx, ch, lexeme) in lexemes(pattern) {
        if ch == '(' && lexeme == Lexeme::Plain && !pattern[idx + 1..].starts_with('?') {
            out.push_str("(?:");
            changed = true;
        } else {
            out.push(ch);
        }
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(pattern)
    }
}
