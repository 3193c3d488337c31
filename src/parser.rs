//! Line-oriented INI parser
//!
//! The parser consumes the input one line at a time and writes sections and
//! entries straight into a [`Store`]. State carried between lines is the
//! current section, the current option and the multi-line accumulator.
//!
//! Lines that cannot be understood but do not compromise the rest of the
//! input (missing delimiter, empty key, empty section name) are collected and
//! reported together once the whole input has been scanned. Duplicates under
//! `strict` and option lines before any header abort the read immediately;
//! whatever was stored up to that point is kept.

use crate::classifier::{clean_line, is_indented};
use crate::error::{IniError, Location, ParsingErrors, Result};
use crate::options::{ParseOptions, UNNAMED_SECTION_NAME};
use crate::store::{Store, fold_key};

/// Parses `text` into `store` according to `options`
pub fn parse_into(
    store: &mut Store,
    options: &ParseOptions,
    text: &str,
    source_name: &str,
) -> Result<()> {
    let mut parser = LineParser::new(store, options, source_name);
    for (index, line) in text.lines().enumerate() {
        parser.parse_line(index + 1, line)?;
    }
    parser.finish()
}

/// Represents an on-going read of one input
pub struct LineParser<'a> {
    store: &'a mut Store,
    options: &'a ParseOptions,
    source_name: &'a str,
    current_section: Option<String>,
    current_option: Option<String>,
    accumulator: Vec<String>,
    in_multiline: bool,
    errors: ParsingErrors,
}

impl<'a> LineParser<'a> {
    /// Creates a parser writing into `store`
    pub fn new(store: &'a mut Store, options: &'a ParseOptions, source_name: &'a str) -> Self {
        Self {
            store,
            options,
            source_name,
            current_section: None,
            current_option: None,
            accumulator: Vec::new(),
            in_multiline: false,
            errors: ParsingErrors::new(source_name),
        }
    }

    /// Processes one raw line (without its line terminator)
    pub fn parse_line(&mut self, line_no: usize, raw: &str) -> Result<()> {
        let cleaned = clean_line(raw, self.options);

        if cleaned.is_empty() {
            if self.in_multiline && self.options.empty_lines_in_values {
                self.accumulator.push(String::new());
            } else {
                self.in_multiline = false;
            }
            return Ok(());
        }

        if self.in_multiline && self.current_option.is_some() {
            if is_indented(raw) {
                self.accumulator.push(cleaned);
                return Ok(());
            }
            self.finish_multiline();
            self.in_multiline = false;
        }

        if let Some(name) = section_header(&cleaned) {
            return self.enter_section(line_no, raw, name);
        }

        let section = match self.current_section.clone() {
            Some(section) => section,
            None if self.options.allow_unnamed_section => {
                self.store.insert_section(UNNAMED_SECTION_NAME);
                self.current_section = Some(UNNAMED_SECTION_NAME.to_string());
                UNNAMED_SECTION_NAME.to_string()
            }
            None => {
                return Err(IniError::MissingSectionHeader {
                    location: self.location(line_no),
                    text: raw.to_string(),
                });
            }
        };

        self.parse_option(line_no, raw, &cleaned, &section)
    }

    /// Flushes a pending multi-line value and reports collected line errors
    pub fn finish(mut self) -> Result<()> {
        if self.in_multiline && self.current_option.is_some() {
            self.finish_multiline();
        }

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IniError::MalformedLine(self.errors))
        }
    }

    fn enter_section(&mut self, line_no: usize, raw: &str, name: &str) -> Result<()> {
        self.current_option = None;

        if name.is_empty() {
            // Following option lines have no section until the next header
            self.current_section = None;
            self.errors.push(line_no, raw);
            return Ok(());
        }

        if !self.options.is_default_section(name)
            && !self.store.insert_section(name)
            && self.options.strict
        {
            return Err(IniError::DuplicateSection {
                section: name.to_string(),
                location: Some(self.location(line_no)),
            });
        }

        self.current_section = Some(name.to_string());
        Ok(())
    }

    fn parse_option(
        &mut self,
        line_no: usize,
        raw: &str,
        cleaned: &str,
        section: &str,
    ) -> Result<()> {
        let (key, value) = match find_delimiter(cleaned, &self.options.delimiters) {
            Some((pos, delimiter)) => (
                cleaned[..pos].trim(),
                Some(cleaned[pos + delimiter.len()..].trim().to_string()),
            ),
            None if self.options.allow_no_value => (cleaned.trim(), None),
            None => {
                self.errors.push(line_no, raw);
                return Ok(());
            }
        };

        if key.is_empty() {
            self.errors.push(line_no, raw);
            return Ok(());
        }

        let key = fold_key(key);
        let strict = self.options.strict;
        let items = self
            .store
            .items_mut(section)
            .ok_or_else(|| IniError::section_not_found(section))?;

        match items.get_mut(&key) {
            Some(_) if strict => {
                return Err(IniError::DuplicateOption {
                    section: section.to_string(),
                    option: key,
                    location: Location::new(self.source_name, line_no),
                });
            }
            Some(existing) => *existing = value.clone(),
            None => {
                items.insert(key.clone(), value.clone());
            }
        }

        self.current_option = Some(key);
        self.accumulator.clear();
        match value {
            Some(value) => {
                self.accumulator.push(value);
                self.in_multiline = true;
            }
            None => self.in_multiline = false,
        }
        Ok(())
    }

    /// Joins the accumulated lines into the current option's value
    fn finish_multiline(&mut self) {
        let joined = self.accumulator.join("\n");
        self.accumulator.clear();

        let (Some(section), Some(option)) = (&self.current_section, &self.current_option) else {
            return;
        };
        if let Some(value) = self
            .store
            .items_mut(section)
            .and_then(|items| items.get_mut(option))
        {
            *value = Some(joined.trim_end().to_string());
        }
    }

    fn location(&self, line_no: usize) -> Location {
        Location::new(self.source_name, line_no)
    }
}

/// Returns the name between brackets if the cleaned line is a header
fn section_header(cleaned: &str) -> Option<&str> {
    cleaned.strip_prefix('[')?.strip_suffix(']')
}

/// Earliest delimiter occurrence; ties go to the delimiter listed first
fn find_delimiter<'d>(line: &str, delimiters: &'d [String]) -> Option<(usize, &'d str)> {
    let mut found: Option<(usize, &'d str)> = None;
    for delimiter in delimiters.iter().filter(|d| !d.is_empty()) {
        if let Some(pos) = line.find(delimiter.as_str()) {
            if found.is_none_or(|(best, _)| pos < best) {
                found = Some((pos, delimiter.as_str()));
            }
        }
    }
    found
}
