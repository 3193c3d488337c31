//! Parser options
//!
//! [`ParseOptions`] fixes the dialect a [`Configuration`](crate::Configuration)
//! reads and writes: delimiters, comment prefixes, duplicate handling,
//! multi-line behavior and the interpolation grammar.

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Default maximum nesting of value substitutions
pub const DEFAULT_INTERPOLATION_DEPTH: usize = 10;

/// Default name of the fallback section
pub const DEFAULT_SECTION_NAME: &str = "DEFAULT";

/// Reserved name of the section holding options that precede any header
pub const UNNAMED_SECTION_NAME: &str = "<UNNAMED_SECTION>";

/// Short list of prefixes or delimiters; the common case stays inline
pub type TokenList = SmallVec<[String; 2]>;

/// Value substitution grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    /// Values are returned verbatim
    None,
    /// `%(name)s` references within the same section, `%%` escapes `%`
    #[default]
    Basic,
    /// `${name}` or `${section:name}` references, `$$` escapes `$`
    Extended,
}

/// Configuration options for reading, resolving and writing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Accept option lines without a delimiter (value is absent)
    pub allow_no_value: bool,
    /// Duplicate sections and options are fatal while reading
    pub strict: bool,
    /// Blank lines inside a multi-line value become part of the value
    pub empty_lines_in_values: bool,
    /// Option lines before the first header go into the unnamed section
    pub allow_unnamed_section: bool,
    /// Name of the fallback section
    pub default_section: String,
    /// Key/value delimiters, in priority order for ties
    pub delimiters: TokenList,
    /// Prefixes marking a whole line as comment
    pub comment_prefixes: TokenList,
    /// Prefixes starting a trailing comment after whitespace
    pub inline_comment_prefixes: TokenList,
    /// Substitution grammar used by `get` and `items`
    pub interpolation: InterpolationMode,
    /// Maximum substitution nesting before failing
    pub max_interpolation_depth: usize,
}

impl ParseOptions {
    /// Creates a new option set with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether keys without a value are accepted
    pub fn with_allow_no_value(mut self, allow: bool) -> Self {
        self.allow_no_value = allow;
        self
    }

    /// Sets strict duplicate handling
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets whether blank lines are kept inside multi-line values
    pub fn with_empty_lines_in_values(mut self, keep: bool) -> Self {
        self.empty_lines_in_values = keep;
        self
    }

    /// Sets whether options may appear before the first section header
    pub fn with_allow_unnamed_section(mut self, allow: bool) -> Self {
        self.allow_unnamed_section = allow;
        self
    }

    /// Sets the name of the fallback section
    pub fn with_default_section(mut self, name: impl Into<String>) -> Self {
        self.default_section = name.into();
        self
    }

    /// Replaces the delimiter list
    pub fn with_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the full-line comment prefixes
    pub fn with_comment_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comment_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the inline comment prefixes
    pub fn with_inline_comment_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inline_comment_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the interpolation grammar
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    /// Sets the maximum substitution depth
    pub fn with_max_interpolation_depth(mut self, depth: usize) -> Self {
        self.max_interpolation_depth = depth;
        self
    }

    /// Delimiter used when writing; `=` if none is configured
    pub fn primary_delimiter(&self) -> &str {
        self.delimiters.first().map(String::as_str).unwrap_or("=")
    }

    pub(crate) fn is_default_section(&self, name: &str) -> bool {
        name == self.default_section
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_no_value: false,
            strict: true,
            empty_lines_in_values: true,
            allow_unnamed_section: false,
            default_section: DEFAULT_SECTION_NAME.to_string(),
            delimiters: smallvec!["=".to_string(), ":".to_string()],
            comment_prefixes: smallvec!["#".to_string(), ";".to_string()],
            inline_comment_prefixes: SmallVec::new(),
            interpolation: InterpolationMode::Basic,
            max_interpolation_depth: DEFAULT_INTERPOLATION_DEPTH,
        }
    }
}
