//! The public configuration facade
//!
//! [`Configuration`] owns the parsed sections together with the options they
//! were read with, and exposes typed access, mutation and serialization.

use crate::coerce::{parse_bool, parse_float, parse_integer};
use crate::deserializer::SectionDeserializer;
use crate::error::{IniError, Result};
use crate::interpolation::Interpolator;
use crate::options::ParseOptions;
use crate::parser::parse_into;
use crate::store::{SectionItems, Store, fold_key};
use crate::writer::render;
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Source name reported for text that did not come from a file
pub const STRING_SOURCE: &str = "<string>";

/// An in-memory INI document.
///
/// Two configurations are equal only if their options, sections and entries
/// match in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    options: ParseOptions,
    store: Store,
}

impl Configuration {
    /// Creates an empty configuration with default options
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Creates an empty configuration with the given options
    pub fn with_options(options: ParseOptions) -> Self {
        let store = Store::new(options.default_section.clone());
        Self { options, store }
    }

    /// Options this configuration reads and writes with
    pub fn parse_options(&self) -> &ParseOptions {
        &self.options
    }

    /// Removes every section and every default
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Reads `text` into this configuration.
    ///
    /// Lines that cannot be parsed are reported together as
    /// [`IniError::MalformedLine`] after the whole text has been read; the
    /// valid lines are kept. Duplicates under `strict` and options before the
    /// first header abort immediately, keeping what was read so far.
    pub fn read(&mut self, text: &str, source_name: &str) -> Result<()> {
        parse_into(&mut self.store, &self.options, text, source_name)
    }

    /// Loads a whole file and reads it, using the path as source name
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        self.read(&text, &path.display().to_string())
    }

    /// Adds an empty section
    pub fn add_section(&mut self, name: &str) -> Result<()> {
        if self.options.is_default_section(name) {
            return Err(IniError::InvalidSectionName {
                section: name.to_string(),
                reason: "the default section always exists".to_string(),
            });
        }
        if name.is_empty() {
            return Err(IniError::InvalidSectionName {
                section: String::new(),
                reason: "section names cannot be empty".to_string(),
            });
        }
        if !self.store.insert_section(name) {
            return Err(IniError::DuplicateSection {
                section: name.to_string(),
                location: None,
            });
        }
        Ok(())
    }

    /// Returns true if the section exists; always true for the default section
    pub fn has_section(&self, name: &str) -> bool {
        self.options.is_default_section(name) || self.store.contains_section(name)
    }

    /// Returns true if the section or, for existing sections, the defaults
    /// define `option`
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        let Some(items) = self.store.items(section) else {
            return false;
        };
        let key = fold_key(option);
        items.contains_key(&key)
            || (!self.options.is_default_section(section)
                && self.store.defaults().contains_key(&key))
    }

    /// Section names in creation order, without the default section
    pub fn sections(&self) -> Vec<&str> {
        self.store.sections().map(|(name, _)| name).collect()
    }

    /// Number of sections, without the default section
    pub fn section_count(&self) -> usize {
        self.store.section_count()
    }

    /// Returns true if there are no sections and no defaults
    pub fn is_empty(&self) -> bool {
        self.store.section_count() == 0 && self.store.defaults().is_empty()
    }

    /// Option names of a section, followed by inherited defaults
    pub fn options(&self, section: &str) -> Result<Vec<&str>> {
        let items = self
            .store
            .items(section)
            .ok_or_else(|| IniError::section_not_found(section))?;

        let mut names: Vec<&str> = items.keys().map(String::as_str).collect();
        if !self.options.is_default_section(section) {
            names.extend(
                self.store
                    .defaults()
                    .keys()
                    .filter(|key| !items.contains_key(*key))
                    .map(String::as_str),
            );
        }
        Ok(names)
    }

    /// Uninterpolated value; `None` for a key present without value
    pub fn get_raw(&self, section: &str, option: &str) -> Result<Option<&str>> {
        self.store.lookup(section, &fold_key(option))
    }

    /// Interpolated value; a key without value reads as the empty string
    pub fn get(&self, section: &str, option: &str) -> Result<String> {
        match self.get_raw(section, option)? {
            Some(raw) => self.interpolator().resolve_value(section, option, raw),
            None => Ok(String::new()),
        }
    }

    /// Interpolated value, or `fallback` if the section or option is missing
    ///
    /// Errors while resolving an existing value, including dangling
    /// references, are returned rather than replaced by the fallback.
    pub fn get_or(&self, section: &str, option: &str, fallback: &str) -> Result<String> {
        match self.get_raw(section, option) {
            Ok(Some(raw)) => self.interpolator().resolve_value(section, option, raw),
            Ok(None) => Ok(String::new()),
            Err(err) if err.is_not_found() => Ok(fallback.to_string()),
            Err(err) => Err(err),
        }
    }

    /// Interpolated value parsed as an integer
    pub fn get_int(&self, section: &str, option: &str) -> Result<i64> {
        parse_integer(&self.get(section, option)?)
    }

    /// Interpolated value parsed as a float
    pub fn get_float(&self, section: &str, option: &str) -> Result<f64> {
        parse_float(&self.get(section, option)?)
    }

    /// Interpolated value parsed as a boolean (`1/yes/true/on`, `0/no/false/off`)
    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool> {
        parse_bool(&self.get(section, option)?)
    }

    /// Own entries followed by inherited defaults, interpolated unless `raw`
    pub fn items(&self, section: &str, raw: bool) -> Result<SectionItems> {
        let mut merged = self.store.merged_items(section)?;
        if !raw {
            let interpolator = self.interpolator();
            for (key, value) in merged.iter_mut() {
                if let Some(text) = value {
                    *text = interpolator.resolve_value(section, key, text)?;
                }
            }
        }
        Ok(merged)
    }

    /// Inserts or replaces an option; an empty section name addresses the defaults
    pub fn set(&mut self, section: &str, option: &str, value: Option<&str>) -> Result<()> {
        let section = route_section(&self.options, section);
        let items = self
            .store
            .items_mut(section)
            .ok_or_else(|| IniError::section_not_found(section))?;
        items.insert(fold_key(option), value.map(str::to_string));
        Ok(())
    }

    /// Removes an option; returns whether it existed
    pub fn remove_option(&mut self, section: &str, option: &str) -> Result<bool> {
        let section = route_section(&self.options, section);
        let items = self
            .store
            .items_mut(section)
            .ok_or_else(|| IniError::section_not_found(section))?;
        Ok(items.shift_remove(&fold_key(option)).is_some())
    }

    /// Removes a named section; returns whether it existed
    pub fn remove_section(&mut self, name: &str) -> bool {
        self.store.remove_section(name)
    }

    /// Renders the configuration as INI text.
    ///
    /// Headerless entries of the unnamed section come first, then the
    /// defaults, then named sections in creation order.
    pub fn render(&self, space_around_delimiters: bool) -> Result<String> {
        render(&self.store, &self.options, space_around_delimiters)
    }

    /// Renders the configuration into `writer`
    pub fn write<W: Write>(&self, mut writer: W, space_around_delimiters: bool) -> Result<()> {
        let text = self.render(space_around_delimiters)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Deserializes the interpolated items of one section
    pub fn deserialize_section<T: DeserializeOwned>(&self, section: &str) -> Result<T> {
        let items = self.items(section, false)?;
        T::deserialize(SectionDeserializer::new(items))
    }

    fn interpolator(&self) -> Interpolator<'_> {
        Interpolator::new(&self.store, &self.options)
    }
}

/// An empty section name addresses the defaults
fn route_section<'s>(options: &'s ParseOptions, section: &'s str) -> &'s str {
    if section.is_empty() {
        &options.default_section
    } else {
        section
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses text with default options
impl FromStr for Configuration {
    type Err = IniError;

    fn from_str(text: &str) -> Result<Self> {
        let mut config = Self::new();
        config.read(text, STRING_SOURCE)?;
        Ok(config)
    }
}

/// Raw view: section name to ordered items, defaults first when present
impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let defaults = self.store.defaults();
        let len = self.store.section_count() + usize::from(!defaults.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        if !defaults.is_empty() {
            map.serialize_entry(self.store.default_name(), defaults)?;
        }
        for (name, items) in self.store.sections() {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}
