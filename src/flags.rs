//! Regex modifier flags
//!
//! A `FlagSet` holds the four inline modifiers understood by the matcher.
//! Its serialized form is the flag letters in fixed order (`i`, `m`, `s`, `U`),
//! which doubles as the content of the inline group prepended to the pattern.

use std::fmt;
use std::str::FromStr;

/// A single regex modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `i` - letters match both upper and lower case
    CaseInsensitive,
    /// `m` - `^` and `$` match at line boundaries
    MultiLine,
    /// `s` - `.` also matches `\n`
    DotMatchesNewline,
    /// `U` - swap the meaning of `x*` and `x*?`
    Ungreedy,
}

impl Flag {
    /// All flags in serialization order
    pub const ALL: [Flag; 4] = [
        Flag::CaseInsensitive,
        Flag::MultiLine,
        Flag::DotMatchesNewline,
        Flag::Ungreedy,
    ];

    /// The inline-modifier letter for this flag
    pub fn letter(self) -> char {
        match self {
            Flag::CaseInsensitive => 'i',
            Flag::MultiLine => 'm',
            Flag::DotMatchesNewline => 's',
            Flag::Ungreedy => 'U',
        }
    }

    /// Human-readable name, used in the key hints
    pub fn label(self) -> &'static str {
        match self {
            Flag::CaseInsensitive => "case-insensitive",
            Flag::MultiLine => "multiline",
            Flag::DotMatchesNewline => "dot-all",
            Flag::Ungreedy => "ungreedy",
        }
    }

    /// Look up a flag by its inline-modifier letter (case-sensitive: `u` is not `U`)
    pub fn from_letter(letter: char) -> Option<Flag> {
        Flag::ALL.into_iter().find(|flag| flag.letter() == letter)
    }
}

/// The four boolean modifiers applied to a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagSet {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_newline: bool,
    pub ungreedy: bool,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, flag: Flag) -> bool {
        match flag {
            Flag::CaseInsensitive => self.case_insensitive,
            Flag::MultiLine => self.multi_line,
            Flag::DotMatchesNewline => self.dot_matches_newline,
            Flag::Ungreedy => self.ungreedy,
        }
    }

    pub fn set(&mut self, flag: Flag, value: bool) {
        let slot = match flag {
            Flag::CaseInsensitive => &mut self.case_insensitive,
            Flag::MultiLine => &mut self.multi_line,
            Flag::DotMatchesNewline => &mut self.dot_matches_newline,
            Flag::Ungreedy => &mut self.ungreedy,
        };
        *slot = value;
    }

    /// Flip one flag, returning its new value
    pub fn toggle(&mut self, flag: Flag) -> bool {
        let value = !self.is_set(flag);
        self.set(flag, value);
        value
    }

    pub fn is_empty(&self) -> bool {
        Flag::ALL.into_iter().all(|flag| !self.is_set(flag))
    }

    /// Letters of the set flags in `i`, `m`, `s`, `U` order; empty if none are set
    pub fn serialize(&self) -> String {
        Flag::ALL
            .into_iter()
            .filter(|flag| self.is_set(*flag))
            .map(Flag::letter)
            .collect()
    }

    /// Inline modifier group to prepend to a pattern, e.g. `(?iU)`
    ///
    /// An empty set contributes nothing.
    pub fn inline_prefix(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("(?{})", self.serialize())
        }
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Error parsing a serialized flag string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFlagsError {
    pub invalid: char,
}

impl fmt::Display for ParseFlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown flag '{}' (expected any of: i, m, s, U)",
            self.invalid
        )
    }
}

impl std::error::Error for ParseFlagsError {}

impl FromStr for FlagSet {
    type Err = ParseFlagsError;

    /// Parse a serialized flag string. Letters may appear in any order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = FlagSet::new();
        for letter in s.chars() {
            let flag = Flag::from_letter(letter).ok_or(ParseFlagsError { invalid: letter })?;
            flags.set(flag, true);
        }
        Ok(flags)
    }
}
