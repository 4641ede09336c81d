//! Fluent construction of regular expressions.
//!
//! [`PatternBuilder`] turns chained calls into pattern text and a set of
//! [`RegexOptions`]; [`PatternBuilder::build`] compiles the result with
//! `fancy-regex`, which adds lookaround support on top of the `regex` crate.
//!
//! ```
//! use fluent_regex::PatternBuilder;
//!
//! let regex = PatternBuilder::new()
//!     .named_group("area", |b| b.digit().exactly(3))
//!     .literal("-")
//!     .named_group("number", |b| b.digit().exactly(4))
//!     .build()
//!     .unwrap();
//! let captures = regex.captures("123-4567").unwrap().unwrap();
//! assert_eq!(captures.name("area").unwrap().as_str(), "123");
//! ```

use std::error::Error as StdError;
use std::fmt;

mod builder;
mod engine;
mod options;

pub use builder::PatternBuilder;
pub use engine::{Captures, EngineConfig, Match, Regex, escape, escape_class};
pub use options::{RegexOption, RegexOptions};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The engine rejected the assembled pattern.
    PatternCompilation { pattern: String, message: String },
    /// The engine failed while matching, e.g. the backtrack limit was hit.
    Match(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PatternCompilation { pattern, message } => {
                write!(f, "pattern compilation error for /{pattern}/: {message}")
            }
            Self::Match(msg) => write!(f, "regex match error: {msg}"),
        }
    }
}

impl StdError for Error {}
