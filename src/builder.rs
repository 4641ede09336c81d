use std::fmt;

use crate::Result;
use crate::engine::{self, EngineConfig, Regex};
use crate::options::{RegexOption, RegexOptions};

const GROUP_STACK_RED_ZONE: usize = 64 * 1024;
const GROUP_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Assembles a regular expression from chained calls.
///
/// Every call appends a fragment (or sets a flag) and returns the same
/// builder. Nothing is checked until [`build`](Self::build) hands the
/// assembled pattern to the engine, so a malformed sequence such as a
/// quantifier with nothing to repeat only fails there.
///
/// ```
/// use fluent_regex::PatternBuilder;
///
/// let regex = PatternBuilder::new()
///     .start_of_string()
///     .digit()
///     .one_or_more()
///     .end_of_string()
///     .build()
///     .unwrap();
/// assert_eq!(regex.as_str(), r"^\d+$");
/// assert!(regex.is_match("2024").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternBuilder {
    pattern: String,
    options: RegexOptions,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create() -> Self {
        Self::new()
    }

    fn push(&mut self, fragment: &str) -> &mut Self {
        self.pattern.push_str(fragment);
        self
    }

    fn enable(&mut self, option: RegexOption) -> &mut Self {
        self.options.insert(option);
        self
    }

    fn wrap<F>(&mut self, open: &str, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        self.pattern.push_str(open);
        stacker::maybe_grow(GROUP_STACK_RED_ZONE, GROUP_STACK_SIZE, || {
            body(self);
        });
        self.push(")")
    }

    // Literals and classes

    pub fn literal(&mut self, text: &str) -> &mut Self {
        let escaped = engine::escape(text);
        self.push(&escaped)
    }

    pub fn digit(&mut self) -> &mut Self {
        self.push(r"\d")
    }

    pub fn word(&mut self) -> &mut Self {
        self.push(r"\w")
    }

    pub fn whitespace(&mut self) -> &mut Self {
        self.push(r"\s")
    }

    pub fn not_digit(&mut self) -> &mut Self {
        self.push(r"\D")
    }

    pub fn not_word(&mut self) -> &mut Self {
        self.push(r"\W")
    }

    pub fn not_whitespace(&mut self) -> &mut Self {
        self.push(r"\S")
    }

    pub fn any_char(&mut self) -> &mut Self {
        self.push(".")
    }

    /// `[chars]`. A `-` between two characters forms a range.
    pub fn set(&mut self, chars: &str) -> &mut Self {
        let escaped = engine::escape_class(chars);
        self.push(&format!("[{escaped}]"))
    }

    pub fn not_set(&mut self, chars: &str) -> &mut Self {
        let escaped = engine::escape_class(chars);
        self.push(&format!("[^{escaped}]"))
    }

    /// `[start-end]`. The bounds are written as-is; `start <= end` is on the caller.
    pub fn range(&mut self, start: char, end: char) -> &mut Self {
        self.push(&format!("[{start}-{end}]"))
    }

    // Quantifiers

    pub fn one_or_more(&mut self) -> &mut Self {
        self.push("+")
    }

    pub fn zero_or_more(&mut self) -> &mut Self {
        self.push("*")
    }

    pub fn optional(&mut self) -> &mut Self {
        self.push("?")
    }

    pub fn exactly(&mut self, n: i32) -> &mut Self {
        self.push(&format!("{{{n}}}"))
    }

    pub fn at_least(&mut self, n: i32) -> &mut Self {
        self.push(&format!("{{{n},}}"))
    }

    pub fn between(&mut self, min: i32, max: i32) -> &mut Self {
        self.push(&format!("{{{min},{max}}}"))
    }

    // Anchors

    pub fn start_of_string(&mut self) -> &mut Self {
        self.push("^")
    }

    pub fn end_of_string(&mut self) -> &mut Self {
        self.push("$")
    }

    pub fn word_boundary(&mut self) -> &mut Self {
        self.push(r"\b")
    }

    pub fn not_word_boundary(&mut self) -> &mut Self {
        self.push(r"\B")
    }

    // Groups

    pub fn group<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        self.wrap("(", body)
    }

    pub fn non_capturing_group<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        self.wrap("(?:", body)
    }

    /// `(?<name>...)`. The name is not checked here; the engine rejects
    /// invalid names at build time.
    pub fn named_group<F>(&mut self, name: &str, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        let open = format!("(?<{name}>");
        self.wrap(&open, body)
    }

    pub fn or(&mut self) -> &mut Self {
        self.push("|")
    }

    // Lookaround

    pub fn positive_lookahead<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        self.wrap("(?=", body)
    }

    pub fn negative_lookahead<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        self.wrap("(?!", body)
    }

    pub fn positive_lookbehind<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        self.wrap("(?<=", body)
    }

    pub fn negative_lookbehind<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        self.wrap("(?<!", body)
    }

    // Options

    pub fn ignore_case(&mut self) -> &mut Self {
        self.enable(RegexOption::IgnoreCase)
    }

    pub fn multiline(&mut self) -> &mut Self {
        self.enable(RegexOption::Multiline)
    }

    pub fn singleline(&mut self) -> &mut Self {
        self.enable(RegexOption::Singleline)
    }

    pub fn explicit_capture(&mut self) -> &mut Self {
        self.enable(RegexOption::ExplicitCapture)
    }

    pub fn compiled(&mut self) -> &mut Self {
        self.enable(RegexOption::Compiled)
    }

    pub fn ignore_pattern_whitespace(&mut self) -> &mut Self {
        self.enable(RegexOption::IgnorePatternWhitespace)
    }

    // Output

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> RegexOptions {
        self.options
    }

    /// Compiles the current pattern and options. The builder stays usable
    /// afterwards and can be extended and built again.
    pub fn build(&self) -> Result<Regex> {
        self.build_with(&EngineConfig::default())
    }

    pub fn build_with(&self, config: &EngineConfig) -> Result<Regex> {
        engine::compile(&self.pattern, self.options, config)
    }
}

impl fmt::Display for PatternBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.options)
    }
}
