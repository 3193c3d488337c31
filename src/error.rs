//! Error types and line locations for INI parsing
//!
//! Every failure the engine can produce is an [`IniError`]. Parse-time
//! failures carry the source name and 1-based line number where they were
//! detected; lookup, interpolation and conversion failures carry the section
//! and option being accessed.

use std::fmt;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T, E = IniError> = std::result::Result<T, E>;

/// Represents a line inside a named input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// Name of the input (file path or `<string>`)
    pub source_name: String,
    /// Line number (1-based)
    pub line: usize,
}

impl Location {
    /// Creates a new location
    pub fn new(source_name: impl Into<String>, line: usize) -> Self {
        Self {
            source_name: source_name.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' [line {:2}]", self.source_name, self.line)
    }
}

/// One non-fatal line rejected while reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// Line number (1-based)
    pub line: usize,
    /// The raw, uncleaned line text
    pub text: String,
}

/// All non-fatal line errors of one read pass, in encounter order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingErrors {
    /// Name of the input that was read
    pub source_name: String,
    /// Rejected lines
    pub entries: Vec<LineError>,
}

impl ParsingErrors {
    pub(crate) fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, line: usize, text: &str) {
        self.entries.push(LineError {
            line,
            text: text.to_string(),
        });
    }

    /// Returns true if no line was rejected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of rejected lines
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for ParsingErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Source contains parsing errors: '{}'", self.source_name)?;
        for entry in &self.entries {
            write!(f, "\n\t[line {:2}]: {:?}", entry.line, entry.text)?;
        }
        Ok(())
    }
}

/// Kind of an [`IniError`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SectionNotFound,
    OptionNotFound,
    DuplicateSection,
    DuplicateOption,
    InvalidSectionName,
    MissingSectionHeader,
    InterpolationSyntaxError,
    InterpolationDepthExceeded,
    InvalidWriteKey,
    MalformedLine,
    ValueConversionError,
    Io,
    Custom,
}

/// Main error type for the configuration engine
#[derive(Debug, Error)]
pub enum IniError {
    /// The addressed section does not exist
    #[error("No section: '{section}'")]
    SectionNotFound { section: String },

    /// Neither the section nor the defaults define the option
    #[error("No option '{option}' in section: '{section}'")]
    OptionNotFound { section: String, option: String },

    /// A section was declared twice (strict read) or added twice
    #[error("{}section '{section}' already exists", location_prefix(.location))]
    DuplicateSection {
        section: String,
        location: Option<Location>,
    },

    /// An option was declared twice in one section during a strict read
    #[error("While reading from {location}: option '{option}' in section '{section}' already exists")]
    DuplicateOption {
        section: String,
        option: String,
        location: Location,
    },

    /// Explicit `add_section` of a name that cannot be a regular section
    #[error("Invalid section name '{section}': {reason}")]
    InvalidSectionName { section: String, reason: String },

    /// An option line appeared before any section header
    #[error("File contains no section headers.\nfile: {location}\n{text:?}")]
    MissingSectionHeader { location: Location, text: String },

    /// A substitution token is malformed
    #[error("Bad interpolation in option '{option}' of section '{section}': {message}")]
    InterpolationSyntax {
        section: String,
        option: String,
        message: String,
    },

    /// Substitution nested deeper than `max_interpolation_depth`
    #[error(
        "Recursion limit exceeded in value substitution: option '{option}' in section '{section}' (max depth {max_depth})"
    )]
    InterpolationDepth {
        section: String,
        option: String,
        max_depth: usize,
    },

    /// A key cannot be written back without changing its meaning
    #[error("Cannot write key '{key}': {reason}")]
    InvalidWriteKey { key: String, reason: String },

    /// Aggregated non-fatal line errors from one read pass
    #[error("{0}")]
    MalformedLine(ParsingErrors),

    /// A typed getter could not convert the resolved value
    #[error("Not a {expected}: '{value}'")]
    ValueConversion {
        value: String,
        expected: &'static str,
    },

    /// Reading an input file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom message produced during serde deserialization
    #[error("{0}")]
    Custom(String),
}

fn location_prefix(location: &Option<Location>) -> String {
    match location {
        Some(location) => format!("While reading from {location}: "),
        None => String::new(),
    }
}

impl IniError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IniError::SectionNotFound { .. } => ErrorKind::SectionNotFound,
            IniError::OptionNotFound { .. } => ErrorKind::OptionNotFound,
            IniError::DuplicateSection { .. } => ErrorKind::DuplicateSection,
            IniError::DuplicateOption { .. } => ErrorKind::DuplicateOption,
            IniError::InvalidSectionName { .. } => ErrorKind::InvalidSectionName,
            IniError::MissingSectionHeader { .. } => ErrorKind::MissingSectionHeader,
            IniError::InterpolationSyntax { .. } => ErrorKind::InterpolationSyntaxError,
            IniError::InterpolationDepth { .. } => ErrorKind::InterpolationDepthExceeded,
            IniError::InvalidWriteKey { .. } => ErrorKind::InvalidWriteKey,
            IniError::MalformedLine(_) => ErrorKind::MalformedLine,
            IniError::ValueConversion { .. } => ErrorKind::ValueConversionError,
            IniError::Io(_) => ErrorKind::Io,
            IniError::Custom(_) => ErrorKind::Custom,
        }
    }

    /// Returns the line location for errors raised while reading
    pub fn location(&self) -> Option<&Location> {
        match self {
            IniError::DuplicateSection { location, .. } => location.as_ref(),
            IniError::DuplicateOption { location, .. }
            | IniError::MissingSectionHeader { location, .. } => Some(location),
            _ => None,
        }
    }

    /// Returns true for lookup failures (missing section or option)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::SectionNotFound | ErrorKind::OptionNotFound
        )
    }

    pub(crate) fn section_not_found(section: &str) -> Self {
        IniError::SectionNotFound {
            section: section.to_string(),
        }
    }

    pub(crate) fn option_not_found(section: &str, option: &str) -> Self {
        IniError::OptionNotFound {
            section: section.to_string(),
            option: option.to_string(),
        }
    }

    pub(crate) fn interpolation_syntax(section: &str, option: &str, message: String) -> Self {
        IniError::InterpolationSyntax {
            section: section.to_string(),
            option: option.to_string(),
            message,
        }
    }
}

impl serde::de::Error for IniError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        IniError::Custom(msg.to_string())
    }
}
