//! In-memory storage of sections and their entries
//!
//! Sections and entries keep insertion order. Keys are stored case-folded;
//! section names are case-sensitive. The defaults bucket lives apart from the
//! named sections and is addressed by the configured default-section name.

use crate::error::{IniError, Result};
use indexmap::IndexMap;

/// Ordered entries of one section: folded key to optional value
pub type SectionItems = IndexMap<String, Option<String>>;

/// Folds an option name into its stored form
pub fn fold_key(key: &str) -> String {
    key.to_ascii_lowercase()
}

/// Defaults plus ordered named sections.
///
/// Equality is order-sensitive for both sections and entries.
#[derive(Debug, Clone, Default)]
pub struct Store {
    default_name: String,
    defaults: SectionItems,
    sections: IndexMap<String, SectionItems>,
}

impl Store {
    /// Creates an empty store whose defaults answer to `default_name`
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            default_name: default_name.into(),
            defaults: SectionItems::new(),
            sections: IndexMap::new(),
        }
    }

    /// Name the defaults bucket is addressed by
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Drops all sections and defaults
    pub fn clear(&mut self) {
        self.defaults.clear();
        self.sections.clear();
    }

    /// Entries of the defaults bucket
    pub fn defaults(&self) -> &SectionItems {
        &self.defaults
    }

    /// Named sections in creation order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &SectionItems)> {
        self.sections
            .iter()
            .map(|(name, items)| (name.as_str(), items))
    }

    /// Number of named sections
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if a named section exists (the defaults never count)
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Appends an empty section; returns false if it already exists
    pub fn insert_section(&mut self, name: &str) -> bool {
        if self.sections.contains_key(name) {
            return false;
        }
        self.sections.insert(name.to_string(), SectionItems::new());
        true
    }

    /// Removes a named section, shifting later sections down
    pub fn remove_section(&mut self, name: &str) -> bool {
        self.sections.shift_remove(name).is_some()
    }

    /// Entries of a section, or the defaults for the default name
    pub fn items(&self, section: &str) -> Option<&SectionItems> {
        if section == self.default_name {
            Some(&self.defaults)
        } else {
            self.sections.get(section)
        }
    }

    /// Mutable entries of a section, or the defaults for the default name
    pub fn items_mut(&mut self, section: &str) -> Option<&mut SectionItems> {
        if section == self.default_name {
            Some(&mut self.defaults)
        } else {
            self.sections.get_mut(section)
        }
    }

    /// Raw value of `key` (already folded) with one-hop defaults fallback.
    ///
    /// An unknown section still consults the defaults before failing with
    /// `SectionNotFound`.
    pub fn lookup(&self, section: &str, key: &str) -> Result<Option<&str>> {
        let own = self.items(section);

        if let Some(value) = own.and_then(|items| items.get(key)) {
            return Ok(value.as_deref());
        }

        if section != self.default_name {
            if let Some(value) = self.defaults.get(key) {
                return Ok(value.as_deref());
            }
        }

        if own.is_none() {
            return Err(IniError::section_not_found(section));
        }
        Err(IniError::option_not_found(section, key))
    }

    /// Own entries followed by defaults entries the section does not override
    pub fn merged_items(&self, section: &str) -> Result<SectionItems> {
        let own = self
            .items(section)
            .ok_or_else(|| IniError::section_not_found(section))?;

        let mut merged = own.clone();
        if section != self.default_name {
            for (key, value) in &self.defaults {
                if !merged.contains_key(key) {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(merged)
    }
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.default_name == other.default_name
            && same_entries(&self.defaults, &other.defaults)
            && self.sections.len() == other.sections.len()
            && self
                .sections
                .iter()
                .zip(&other.sections)
                .all(|((name, items), (other_name, other_items))| {
                    name == other_name && same_entries(items, other_items)
                })
    }
}

impl Eq for Store {}

fn same_entries(left: &SectionItems, right: &SectionItems) -> bool {
    left.iter().eq(right.iter())
}
