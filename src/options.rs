use std::fmt;

/// A single engine flag that a [`PatternBuilder`](crate::PatternBuilder) can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegexOption {
    IgnoreCase,
    Multiline,
    /// `.` also matches `\n`.
    Singleline,
    /// Only named groups capture.
    ExplicitCapture,
    /// Precompilation hint. Recorded, but the engine always compiles eagerly.
    Compiled,
    IgnorePatternWhitespace,
}

impl RegexOption {
    pub const ALL: [RegexOption; 6] = [
        RegexOption::IgnoreCase,
        RegexOption::Multiline,
        RegexOption::Singleline,
        RegexOption::ExplicitCapture,
        RegexOption::Compiled,
        RegexOption::IgnorePatternWhitespace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::IgnoreCase => "IgnoreCase",
            Self::Multiline => "Multiline",
            Self::Singleline => "Singleline",
            Self::ExplicitCapture => "ExplicitCapture",
            Self::Compiled => "Compiled",
            Self::IgnorePatternWhitespace => "IgnorePatternWhitespace",
        }
    }
}

impl fmt::Display for RegexOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of [`RegexOption`]s.
///
/// Flags only accumulate: there is `insert` and `union`, but no way to clear
/// a flag once it is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RegexOptions {
    ignore_case: bool,
    multiline: bool,
    singleline: bool,
    explicit_capture: bool,
    compiled: bool,
    ignore_pattern_whitespace: bool,
}

impl RegexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, option: RegexOption) -> &mut Self {
        *self.slot_mut(option) = true;
        self
    }

    pub fn with(mut self, option: RegexOption) -> Self {
        self.insert(option);
        self
    }

    pub fn contains(&self, option: RegexOption) -> bool {
        match option {
            RegexOption::IgnoreCase => self.ignore_case,
            RegexOption::Multiline => self.multiline,
            RegexOption::Singleline => self.singleline,
            RegexOption::ExplicitCapture => self.explicit_capture,
            RegexOption::Compiled => self.compiled,
            RegexOption::IgnorePatternWhitespace => self.ignore_pattern_whitespace,
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            ignore_case: self.ignore_case || other.ignore_case,
            multiline: self.multiline || other.multiline,
            singleline: self.singleline || other.singleline,
            explicit_capture: self.explicit_capture || other.explicit_capture,
            compiled: self.compiled || other.compiled,
            ignore_pattern_whitespace: self.ignore_pattern_whitespace
                || other.ignore_pattern_whitespace,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Enabled flags, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = RegexOption> + '_ {
        RegexOption::ALL
            .into_iter()
            .filter(move |option| self.contains(*option))
    }

    fn slot_mut(&mut self, option: RegexOption) -> &mut bool {
        match option {
            RegexOption::IgnoreCase => &mut self.ignore_case,
            RegexOption::Multiline => &mut self.multiline,
            RegexOption::Singleline => &mut self.singleline,
            RegexOption::ExplicitCapture => &mut self.explicit_capture,
            RegexOption::Compiled => &mut self.compiled,
            RegexOption::IgnorePatternWhitespace => &mut self.ignore_pattern_whitespace,
        }
    }
}

impl From<RegexOption> for RegexOptions {
    fn from(option: RegexOption) -> Self {
        Self::default().with(option)
    }
}

impl FromIterator<RegexOption> for RegexOptions {
    fn from_iter<I: IntoIterator<Item = RegexOption>>(iter: I) -> Self {
        let mut options = Self::default();
        for option in iter {
            options.insert(option);
        }
        options
    }
}

impl fmt::Display for RegexOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        for (idx, option) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(option.name())?;
        }
        Ok(())
    }
}
